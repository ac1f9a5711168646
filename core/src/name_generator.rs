//! Company names and contact addresses for generated customers.
//!
//! Names cycle through a fixed pool so a batch reads like a real customer
//! list. Once the pool is exhausted a cycle number is appended, which keeps
//! names quasi-unique for large batches.

use crate::config::CustomerConfig;

pub const DEFAULT_COMPANIES: &[&str] = &[
    "Acme Corp", "TechStart", "DataFlow Inc", "CloudNine", "StartupXYZ",
    "MegaCo", "InnovateTech", "GrowthLabs", "ScaleUp", "DisruptCo",
    "FutureTech", "AlphaBase", "BetaWorks", "GammaLabs", "DeltaForce",
    "OmegaSoft", "ZetaCloud", "NovaStar", "QuantumLeap", "NexGen",
    "Velocity Inc", "Zenith Labs", "Axiom Tech", "Catalyst Co", "Momentum",
    "Paradigm", "Synergy Labs", "Vertex Tech", "Horizon Inc", "Summit Co",
    "Eclipse Tech", "Fusion Labs", "Genesis Co", "Helix Inc", "Ignite Labs",
    "Kinetic Tech", "Nexus Co", "Orbit Inc", "Phoenix Labs", "Quantum Co",
    "Radiant Tech", "Stellar Inc", "Titan Labs", "Unity Co", "Vortex Inc",
    "Wavelength", "Xcel Labs", "Yonder Tech", "Zenith Co", "Apex Inc",
];

pub struct NameGenerator;

impl NameGenerator {
    /// Pool entry used for the `index`-th customer (no cycle suffix).
    pub fn base_company(companies: &[String], index: usize) -> &str {
        if companies.is_empty() {
            return "";
        }
        &companies[index % companies.len()]
    }

    /// Display name for the `index`-th customer (0-based).
    /// "Acme Corp", ..., then "Acme Corp 2" on the second pass.
    pub fn company_name(companies: &[String], index: usize) -> String {
        let base = Self::base_company(companies, index);
        let pool = companies.len().max(1);
        if index >= pool {
            format!("{base} {}", index / pool + 1)
        } else {
            base.to_string()
        }
    }

    /// Lower-cased, whitespace-free company name with generic fragments removed.
    /// Falls back to the unstripped form if stripping leaves nothing.
    pub fn email_slug(company: &str, stripped_fragments: &[String]) -> String {
        let compact: String = company
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let stripped = stripped_fragments
            .iter()
            .filter(|f| !f.is_empty())
            .fold(compact.clone(), |acc, fragment| acc.replace(fragment.as_str(), ""));
        if stripped.is_empty() {
            compact
        } else {
            stripped
        }
    }

    pub fn contact_email(company: &str, config: &CustomerConfig) -> String {
        format!(
            "{}@{}.{}",
            config.email_local_part,
            Self::email_slug(company, &config.stripped_fragments),
            config.email_tld
        )
    }
}

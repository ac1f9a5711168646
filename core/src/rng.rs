//! Injectable random number generation.
//!
//! RULE: No generator may call an ambient platform RNG.
//! All randomness flows through a MetricsRng handed in by the caller.
//!
//! The engine owns an RngBank holding one master seed. Each generator
//! call gets its own stream, seeded from
//! (master_seed, generator slot, call index). This means:
//!   - A seeded engine replays the exact same sequence of datasets.
//!   - Two consecutive calls of the same generator still differ.
//!   - Adding a new generator never changes existing generators' streams.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named random source for one generator call.
pub struct MetricsRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl MetricsRng {
    /// Reproducible stream from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Unseeded stream for interactive use.
    pub fn from_entropy() -> Self {
        Self {
            name: "entropy",
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n). Returns 0 when n is 0.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        if n == 0 {
            return 0;
        }
        self.inner.next_u64() % n
    }

    /// Roll a float uniformly in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fill a buffer with random bytes.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        use rand::RngCore;
        self.inner.fill_bytes(dest);
    }
}

/// Master seed for one engine, handing out per-call streams.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Bank with a master seed drawn from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_generator(&self, slot: GeneratorSlot) -> MetricsRng {
        self.for_generator_at_call(slot, 0)
    }

    /// Stream for the `call`-th invocation of a generator.
    pub fn for_generator_at_call(&self, slot: GeneratorSlot, call: u64) -> MetricsRng {
        let slot_mix = (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        let call_mix = call.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        MetricsRng::new(self.master_seed ^ slot_mix ^ call_mix.rotate_left(31))
            .with_name(slot.name())
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum GeneratorSlot {
    Revenue = 0,
    Customers = 1,
    Cohorts = 2,
    Acquisition = 3,
    Sparkline = 4,
    Snapshot = 5,
    // Add new generators here, append only.
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Customers => "customers",
            Self::Cohorts => "cohorts",
            Self::Acquisition => "acquisition",
            Self::Sparkline => "sparkline",
            Self::Snapshot => "snapshot",
        }
    }
}

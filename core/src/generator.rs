//! Generator trait.
//!
//! RULE: Every dataset generator implements MetricsGenerator.
//! Generators are pure: the only inputs are their own parameters,
//! the reference date, and the random source handed to generate().

use crate::rng::{GeneratorSlot, MetricsRng};
use chrono::NaiveDate;
use serde::Serialize;

/// The contract every dataset generator must fulfill.
pub trait MetricsGenerator {
    /// One row of the generated dataset.
    type Record: Serialize + Clone;

    /// Unique stable name for this generator.
    fn name(&self) -> &'static str;

    /// Slot the engine derives this generator's random streams from.
    fn slot(&self) -> GeneratorSlot;

    /// Produce a fresh dataset.
    ///
    /// - `today`: reference date used for labels and date offsets
    /// - `rng`:   the random source for this call
    fn generate(&self, today: NaiveDate, rng: &mut MetricsRng) -> Vec<Self::Record>;
}

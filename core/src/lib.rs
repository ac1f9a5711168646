//! MetricsHub core: synthetic SaaS metrics for dashboard display.
//!
//! Every dataset is produced fresh by a generator fed an explicit
//! random source. Nothing is persisted and nothing is fetched.

pub mod acquisition_generator;
pub mod catalog;
pub mod clock;
pub mod cohort_generator;
pub mod command;
pub mod config;
pub mod customer_generator;
pub mod engine;
pub mod error;
pub mod format;
pub mod generator;
pub mod name_generator;
pub mod revenue_generator;
pub mod rng;
pub mod snapshot;
pub mod sparkline_generator;
pub mod types;

pub use engine::MetricsEngine;
pub use error::{MetricsError, MetricsResult};
pub use generator::MetricsGenerator;
pub use rng::MetricsRng;

//! Admin statistics service.

pub mod stats;

pub use stats::{AdminStats, StatsService};

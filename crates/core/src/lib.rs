//! Folioquant Core - quantitative analytics for portfolio trackers.
//!
//! This crate turns positions, price history and user parameters into
//! decision-relevant numbers: a return-correlation matrix, a Monte Carlo
//! projection of portfolio value, and target-allocation drift with
//! rebalancing actions. It performs no I/O of its own; price history is
//! supplied through the `PriceHistoryProviderTrait` implemented by the host.

pub mod constants;
pub mod errors;
pub mod portfolio;

// Re-export common types from portfolio modules
pub use portfolio::allocation::*;
pub use portfolio::correlation::*;
pub use portfolio::positions::*;
pub use portfolio::returns::*;
pub use portfolio::simulation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

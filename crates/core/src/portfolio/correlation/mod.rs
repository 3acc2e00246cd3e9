//! Pairwise return correlation across a set of instruments.

mod correlation_calculator;
mod correlation_model;
mod correlation_service;
mod correlation_traits;

pub use correlation_calculator::*;
pub use correlation_model::*;
pub use correlation_service::*;
pub use correlation_traits::*;

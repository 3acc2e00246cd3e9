//! Monte Carlo projection of portfolio value under geometric Brownian motion.

mod percentiles;
mod simulation_engine;
mod simulation_model;

pub use percentiles::*;
pub use simulation_engine::*;
pub use simulation_model::*;

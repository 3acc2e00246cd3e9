//! Portfolio analytics engines.

pub mod allocation;
pub mod correlation;
pub mod positions;
pub mod returns;
pub mod simulation;

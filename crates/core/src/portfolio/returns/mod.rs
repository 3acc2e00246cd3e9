//! Daily return series derived from host-supplied price history.

mod return_series;
mod returns_model;

pub use return_series::*;
pub use returns_model::*;

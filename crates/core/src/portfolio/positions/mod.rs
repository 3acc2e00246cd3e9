//! Host-supplied holdings, valued in the portfolio's base currency.

mod positions_model;

pub use positions_model::*;

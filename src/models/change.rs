//! Percentage change models

use std::fmt;

use crate::models::Asset;
use crate::utils::format::format_thousands;

/// Outcome of a percentage change calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceChange {
    Percent(f64),
    /// The window reaches further back than the available history
    InsufficientData,
    /// The reference price is zero or the result is not finite
    Undefined,
}

impl fmt::Display for PriceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceChange::Percent(value) => write!(f, "{}%", format_thousands(*value, 2)),
            PriceChange::InsufficientData => write!(f, "Insufficient data"),
            PriceChange::Undefined => write!(f, "Undefined"),
        }
    }
}

/// One row of the currencies table
#[derive(Debug, Clone)]
pub struct ChangeRow<'a> {
    pub asset: &'a Asset,
    pub change_1d: PriceChange,
    pub change_7d: PriceChange,
    pub change_30d: PriceChange,
}

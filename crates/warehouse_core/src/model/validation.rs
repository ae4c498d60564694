//! Validation errors raised while building or staging domain entities.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invariant violation detected before an entity reaches storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Product name is empty or whitespace only.
    EmptyName,
    /// Product quantity is below zero.
    NegativeQuantity(i64),
    /// Product price is negative, NaN or infinite.
    InvalidPrice(f64),
    /// An order references a product that has no assigned id yet.
    ///
    /// `position` is the index of the offending product in the order.
    UnpersistedProduct { position: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NegativeQuantity(quantity) => {
                write!(f, "product quantity must be >= 0, got {quantity}")
            }
            Self::InvalidPrice(price) => {
                write!(f, "product price must be a finite value >= 0, got {price}")
            }
            Self::UnpersistedProduct { position } => write!(
                f,
                "order product at position {position} has not been persisted yet"
            ),
        }
    }
}

impl Error for ValidationError {}

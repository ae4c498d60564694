//! Product domain model.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - `quantity >= 0`.
//! - `price` is finite and `>= 0`.

use super::validation::ValidationError;
use super::UNASSIGNED_ID;
use serde::{Deserialize, Serialize};

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// Stock-keeping item tracked by the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// `0` until the storage adapter assigns an id.
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl Product {
    /// Builds an unpersisted product after checking all field invariants.
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            quantity,
            price,
        };
        product.validate()?;
        Ok(product)
    }

    /// Checks field invariants.
    ///
    /// Fields are public, so write paths call this again before SQL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.quantity < 0 {
            return Err(ValidationError::NegativeQuantity(self.quantity));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// Returns whether storage has assigned an id to this product.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}

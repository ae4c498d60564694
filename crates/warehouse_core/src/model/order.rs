//! Order domain model.
//!
//! # Invariants
//! - An order references its products; it does not own their lifecycle.
//! - Product order is significant and preserved by storage.
//! - An empty product list is structurally valid but flagged by `is_empty`.

use super::product::Product;
use super::validation::ValidationError;
use super::UNASSIGNED_ID;
use serde::{Deserialize, Serialize};

/// Storage-assigned order identifier.
pub type OrderId = i64;

/// Ordered selection of previously persisted products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// `0` until the storage adapter assigns an id.
    pub id: OrderId,
    pub products: Vec<Product>,
}

impl Order {
    /// Builds an unpersisted order over the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            products,
        }
    }

    /// Checks that every referenced product already has a storage id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.products.iter().position(|product| !product.is_persisted()) {
            Some(position) => Err(ValidationError::UnpersistedProduct { position }),
            None => Ok(()),
        }
    }

    /// Returns whether storage has assigned an id to this order.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Returns whether this order references no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

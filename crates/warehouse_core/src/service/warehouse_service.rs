//! Warehouse use-case service.
//!
//! # Invariants
//! - Entities are built with an unassigned id and validated before any
//!   repository call.
//! - Repository results and errors are returned unchanged.
//! - The service never begins, commits or rolls back.

use crate::model::order::{Order, OrderId};
use crate::model::product::{Product, ProductId};
use crate::repo::order_repo::OrderRepository;
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoResult;
use log::{info, warn};

/// Creates products and orders through injected repositories.
pub struct WarehouseService<P: ProductRepository, O: OrderRepository> {
    product_repo: P,
    order_repo: O,
}

impl<P: ProductRepository, O: OrderRepository> WarehouseService<P, O> {
    pub fn new(product_repo: P, order_repo: O) -> Self {
        Self {
            product_repo,
            order_repo,
        }
    }

    /// Creates and stages a product.
    ///
    /// # Contract
    /// - Invalid input fails with `RepoError::Validation` and reaches no
    ///   repository.
    /// - The returned id is assigned but durable only after commit.
    pub fn create_product(
        &self,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> RepoResult<Product> {
        let product = Product::new(name, quantity, price)?;
        let product = self.product_repo.add(product)?;
        info!(
            "event=product_create module=service status=ok product_id={}",
            product.id
        );
        Ok(product)
    }

    /// Creates and stages an order over `products`, keeping their order.
    ///
    /// # Contract
    /// - Every product must already be persisted; otherwise the repository
    ///   fails with `ValidationError::UnpersistedProduct`.
    /// - An empty product list is accepted and logged as a warning.
    pub fn create_order(&self, products: Vec<Product>) -> RepoResult<Order> {
        let order = Order::new(products);
        if order.is_empty() {
            warn!("event=order_create module=service status=warn reason=empty_order");
        }

        let order = self.order_repo.add(order)?;
        info!(
            "event=order_create module=service status=ok order_id={} product_count={}",
            order.id,
            order.products.len()
        );
        Ok(order)
    }

    /// Gets one product by id.
    pub fn get_product(&self, id: ProductId) -> RepoResult<Product> {
        self.product_repo.get(id)
    }

    /// Gets one order, with its products, by id.
    pub fn get_order(&self, id: OrderId) -> RepoResult<Order> {
        self.order_repo.get(id)
    }
}

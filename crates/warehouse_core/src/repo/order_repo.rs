//! Order repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist orders and their ordered product links.
//! - Rebuild the full order graph on lookup.
//!
//! # Invariants
//! - Referenced products must carry an assigned id; unpersisted products are
//!   rejected, never cascaded into storage.
//! - `order_products.position` preserves the supplied product order.
//! - Whether a referenced id exists is checked by SQLite at `COMMIT`
//!   (deferred foreign key).

use super::product_repo::parse_product_row;
use super::{ensure_active_transaction, ensure_lookup_id, RepoError, RepoResult};
use crate::model::order::{Order, OrderId};
use log::debug;
use rusqlite::{params, Connection};

const ENTITY: &str = "order";

/// Repository interface for orders.
pub trait OrderRepository {
    /// Stages an unpersisted order and returns it with its assigned id.
    ///
    /// Requires an open unit of work on the repository's session.
    fn add(&self, order: Order) -> RepoResult<Order>;
    /// Loads one order, including its products in stored order.
    fn get(&self, id: OrderId) -> RepoResult<Order>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for &R {
    fn add(&self, order: Order) -> RepoResult<Order> {
        (**self).add(order)
    }

    fn get(&self, id: OrderId) -> RepoResult<Order> {
        (**self).get(id)
    }
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn add(&self, order: Order) -> RepoResult<Order> {
        if order.is_persisted() {
            return Err(RepoError::AlreadyPersisted {
                entity: ENTITY,
                id: order.id,
            });
        }
        order.validate()?;
        ensure_active_transaction(self.conn, ENTITY)?;

        self.conn.execute("INSERT INTO orders DEFAULT VALUES;", [])?;
        let id = self.conn.last_insert_rowid();

        let mut link = self.conn.prepare(
            "INSERT INTO order_products (order_id, position, product_id)
             VALUES (?1, ?2, ?3);",
        )?;
        for (position, product) in order.products.iter().enumerate() {
            link.execute(params![id, position as i64, product.id])?;
        }

        debug!(
            "event=order_add module=repo status=ok order_id={} product_count={}",
            id,
            order.products.len()
        );
        Ok(Order { id, ..order })
    }

    fn get(&self, id: OrderId) -> RepoResult<Order> {
        ensure_lookup_id(ENTITY, id)?;

        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        let mut stmt = self.conn.prepare(
            "SELECT
                op.product_id AS link_product_id,
                p.id AS id,
                p.name AS name,
                p.quantity AS quantity,
                p.price AS price
             FROM order_products op
             LEFT JOIN products p ON p.id = op.product_id
             WHERE op.order_id = ?1
             ORDER BY op.position ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            if row.get::<_, Option<i64>>("id")?.is_none() {
                let product_id: i64 = row.get("link_product_id")?;
                return Err(RepoError::InvalidData(format!(
                    "order {id} references missing product {product_id}"
                )));
            }
            products.push(parse_product_row(row)?);
        }

        Ok(Order { id, products })
    }
}

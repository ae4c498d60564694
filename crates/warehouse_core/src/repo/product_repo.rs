//! Product repository contract and SQLite implementation.
//!
//! # Invariants
//! - Ids are assigned eagerly: `add` inserts immediately and returns the
//!   rowid, which becomes durable only when the enclosing unit of work
//!   commits.
//! - `add` fails with `RepoError::NoActiveTransaction` outside a unit of
//!   work instead of letting SQLite autocommit the insert.
//! - Rows failing `Product::validate()` on read are reported, not masked.

use super::{ensure_active_transaction, ensure_lookup_id, RepoError, RepoResult};
use crate::model::product::{Product, ProductId};
use log::debug;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "product";

/// Repository interface for products.
pub trait ProductRepository {
    /// Stages an unpersisted product and returns it with its assigned id.
    ///
    /// Requires an open unit of work on the repository's session.
    fn add(&self, product: Product) -> RepoResult<Product>;
    /// Loads one product by id.
    fn get(&self, id: ProductId) -> RepoResult<Product>;
}

impl<R: ProductRepository + ?Sized> ProductRepository for &R {
    fn add(&self, product: Product) -> RepoResult<Product> {
        (**self).add(product)
    }

    fn get(&self, id: ProductId) -> RepoResult<Product> {
        (**self).get(id)
    }
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn add(&self, product: Product) -> RepoResult<Product> {
        if product.is_persisted() {
            return Err(RepoError::AlreadyPersisted {
                entity: ENTITY,
                id: product.id,
            });
        }
        product.validate()?;
        ensure_active_transaction(self.conn, ENTITY)?;

        self.conn.execute(
            "INSERT INTO products (name, quantity, price) VALUES (?1, ?2, ?3);",
            params![product.name.as_str(), product.quantity, product.price],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!("event=product_add module=repo status=ok product_id={id}");
        Ok(Product { id, ..product })
    }

    fn get(&self, id: ProductId) -> RepoResult<Product> {
        ensure_lookup_id(ENTITY, id)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, name, quantity, price
             FROM products
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_product_row(row),
            None => Err(RepoError::NotFound { entity: ENTITY, id }),
        }
    }
}

/// Maps a row exposing `id`, `name`, `quantity`, `price` columns.
pub(crate) fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let product = Product {
        id: row.get("id")?,
        name: row.get("name")?,
        quantity: row.get("quantity")?,
        price: row.get("price")?,
    };
    product.validate().map_err(|err| {
        RepoError::InvalidData(format!("products row {}: {err}", product.id))
    })?;
    Ok(product)
}

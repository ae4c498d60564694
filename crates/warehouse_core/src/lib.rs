//! Core persistence logic for the warehouse.
//!
//! Products and orders move into storage through repositories, inside an
//! explicit `UnitOfWork` owned by the caller.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod uow;

pub use config::{ConfigError, WarehouseConfig};
pub use db::{DbError, DbResult, DbTarget, SessionFactory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::order::{Order, OrderId};
pub use model::product::{Product, ProductId};
pub use model::validation::ValidationError;
pub use model::UNASSIGNED_ID;
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::{RepoError, RepoResult};
pub use service::warehouse_service::WarehouseService;
pub use uow::{UnitOfWork, UowError, UowResult, UowState};

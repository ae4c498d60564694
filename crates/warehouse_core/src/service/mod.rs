//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Stay unaware of transactions; callers wrap calls in a `UnitOfWork`.

pub mod warehouse_service;

//! Warehouse domain model.
//!
//! # Responsibility
//! - Define the plain entities handled by core business logic.
//! - Reject invalid entities at construction, before any storage call.
//!
//! # Invariants
//! - `id == 0` means "not yet persisted"; storage assigns the real id once.
//! - Entities carry no persistence knowledge.

pub mod order;
pub mod product;
pub mod validation;

/// Identifier value carried by entities that have not been persisted yet.
pub const UNASSIGNED_ID: i64 = 0;

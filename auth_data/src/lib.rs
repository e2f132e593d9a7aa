//! Data layer for the authorization core
//!
//! This crate contains the storage-facing contract for user records: the
//! entity types, the repository trait the domain layer depends on, and the
//! data-specific error taxonomy. Concrete durable stores live outside this
//! workspace; an in-memory repository ships behind the `test-utils` feature.

pub mod entities;
pub mod error;
pub mod repositories;

pub use entities::*;
pub use error::*;
pub use repositories::*;

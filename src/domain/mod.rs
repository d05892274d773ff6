//! Domain layer: entities and the record store contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on a concrete backend.

pub mod entities;
pub mod repositories;

//! Infrastructure layer for external integrations.
//!
//! Implements the record store contract defined by the domain layer on top of
//! concrete backends.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory, PostgreSQL and Redis record stores
pub mod persistence;

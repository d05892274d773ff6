//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated with `mockall` for unit tests.

pub mod record_store;

pub use record_store::RecordStore;

#[cfg(test)]
pub use record_store::MockRecordStore;

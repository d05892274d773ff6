//! Core domain entities.
//!
//! - [`Record`] - A persisted short identifier → long URL mapping
//! - [`CounterField`] - Record fields that can be atomically incremented
//! - [`ShortUrl`] - Result of shortening
//! - [`Resolution`] - Result of a redirect lookup

pub mod record;

pub use record::{CounterField, Record, Resolution, ShortUrl};

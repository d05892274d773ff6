//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::RecordStore`] trait and
//! expose the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short URL creation with collision retry
//! - [`services::redirect_service::RedirectService`] - Identifier resolution and click counting

pub mod services;

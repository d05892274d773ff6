//! HTTP layer translating requests into service calls.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - Endpoint handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;

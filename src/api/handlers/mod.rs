//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::{missing_short_id_handler, redirect_handler, redirect_head_handler};
pub use shorten::shorten_handler;

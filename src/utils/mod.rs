//! Utility functions for identifier encoding and generation.
//!
//! - [`base62`] - Base-62 encoder/decoder for short identifiers
//! - [`code_generator`] - Candidate identifier derivation
//! - [`url_validator`] - Long URL validation

pub mod base62;
pub mod code_generator;
pub mod url_validator;

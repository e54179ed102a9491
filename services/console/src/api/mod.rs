//! Console HTTP API module.
//!
//! # Purpose
//! Exposes the console's own endpoints and the shared response types,
//! including the error envelope.
pub mod openapi;
pub mod system;
pub mod types;

//! Cluster console HTTP service library crate.
//!
//! # Purpose
//! Exposes the error boundary that turns every failure raised while serving
//! a console request into a uniform JSON envelope (or a login redirect), plus
//! the router wiring, configuration and observability used by the binary and
//! tests.
//!
//! # Notes
//! Business handlers and the auth engine live elsewhere; they only raise
//! [`failure::Failure`] values and register route permissions.
pub mod api;
pub mod app;
pub mod boundary;
pub mod config;
pub mod failure;
pub mod observability;
pub mod routes;

//! Core types and rule-evaluation engine for the Plenário regimental rules
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod context;
pub mod engine;
pub mod error;
pub mod eval;
pub mod outcome;
pub mod record;
pub mod rule;
pub mod store;
pub mod temporal;

pub use error::{Error, Result};

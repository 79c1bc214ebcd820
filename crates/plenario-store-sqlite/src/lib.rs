//! SQLite backend for the Plenário legislative read model.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread pool without blocking the async runtime. The validation engine
//! only reads through [`plenario_core::store::LegislativeStore`]; the ingest
//! methods on [`SqliteStore`] are the write path used by the portal-sync job
//! and by tests.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{NewProposal, SqliteStore};

//! The `LegislativeStore` trait — the read-only query surface the rule
//! evaluators depend on.
//!
//! The trait is implemented by storage backends (e.g.
//! `plenario-store-sqlite`). The engine and the API depend on this
//! abstraction, not on any concrete backend.
//!
//! Missing entities are reported as `Ok(None)` and the evaluators treat them
//! as "rule does not apply". The engine therefore under-reports violations
//! when the read model is incomplete; that is the accepted trade-off for an
//! advisory system that must not fall over on stale data.

use std::future::Future;

use uuid::Uuid;

use crate::record::{Proposal, Session};

/// Abstraction over the legislative read model.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LegislativeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Number of legislators currently holding an active mandate.
  fn count_active_legislators(
    &self,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + '_;

  /// A session with its attendance records. `None` if not found.
  fn get_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// A proposal with its routing history, newest step first.
  /// `None` if not found.
  fn get_proposal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Proposal>, Self::Error>> + Send + '_;

  /// Ids of proposals still in tramitação, capped at `limit`.
  /// Feeds the compliance report's bounded scan.
  fn list_pending_proposals(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;
}

//! [`SqliteStore`] — the SQLite implementation of
//! [`LegislativeStore`], plus the ingest methods that populate the read
//! model.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use plenario_core::{
  record::{Opinion, Presence, Proposal, ProposalStatus, Session, UnitKind},
  store::LegislativeStore,
};

use crate::{
  encode::{
    RawProposal, RawRoutingStep, decode_dt, decode_uuid, encode_dt,
    encode_opinion, encode_status, encode_unit_kind, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Input type ──────────────────────────────────────────────────────────────

/// Input to [`SqliteStore::add_proposal`].
#[derive(Debug, Clone)]
pub struct NewProposal {
  pub kind:       String,
  pub summary:    String,
  /// `None` for executive-originated proposals.
  pub author_id:  Option<Uuid>,
  pub status:     ProposalStatus,
  pub vote_date:  Option<DateTime<Utc>>,
  pub updated_at: DateTime<Utc>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A legislative read model backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Ingest — the portal-sync write path ───────────────────────────────────

  /// Register a legislator; returns the generated id.
  pub async fn add_legislator(&self, name: &str, active: bool) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let name = name.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO legislators (legislator_id, name, active) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, active],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  /// Register a session; returns the generated id.
  pub async fn add_session(
    &self,
    scheduled_at: Option<DateTime<Utc>>,
  ) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let at_str = scheduled_at.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (session_id, scheduled_at) VALUES (?1, ?2)",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  /// Record one legislator's attendance for a session.
  pub async fn record_presence(
    &self,
    session_id: Uuid,
    legislator_id: Uuid,
    present: bool,
  ) -> Result<()> {
    let session_str = encode_uuid(session_id);
    let legislator_str = encode_uuid(legislator_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO presences (session_id, legislator_id, present)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![session_str, legislator_str, present],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  /// Register a handling unit (committee, board, ...); returns the id.
  pub async fn add_unit(&self, name: &str, kind: UnitKind) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let name = name.to_owned();
    let kind_str = encode_unit_kind(kind).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO units (unit_id, name, kind) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, kind_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  /// Register a proposal; returns the generated id.
  pub async fn add_proposal(&self, input: NewProposal) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let author_str = input.author_id.map(encode_uuid);
    let status_str = encode_status(input.status).to_owned();
    let vote_str = input.vote_date.map(encode_dt);
    let updated_str = encode_dt(input.updated_at);
    let kind = input.kind;
    let summary = input.summary;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO proposals (
             proposal_id, kind, summary, author_id, status, vote_date, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            kind,
            summary,
            author_str,
            status_str,
            vote_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  /// Append a routing step to a proposal's tramitação history.
  pub async fn add_routing_step(
    &self,
    proposal_id: Uuid,
    unit_id: Option<Uuid>,
    opinion: Option<&Opinion>,
    created_at: DateTime<Utc>,
  ) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let proposal_str = encode_uuid(proposal_id);
    let unit_str = unit_id.map(encode_uuid);
    let opinion_str = opinion.map(encode_opinion).transpose()?;
    let at_str = encode_dt(created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO routing_steps (
             step_id, proposal_id, unit_id, opinion_json, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, proposal_str, unit_str, opinion_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  /// Move a proposal to a new tramitação status.
  pub async fn set_proposal_status(
    &self,
    proposal_id: Uuid,
    status: ProposalStatus,
  ) -> Result<()> {
    let id_str = encode_uuid(proposal_id);
    let status_str = encode_status(status).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE proposals SET status = ?1 WHERE proposal_id = ?2",
          rusqlite::params![status_str, id_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}

// ─── LegislativeStore impl ───────────────────────────────────────────────────

impl LegislativeStore for SqliteStore {
  type Error = Error;

  async fn count_active_legislators(&self) -> Result<u32> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM legislators WHERE active = 1",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u32)
  }

  async fn get_session(&self, id: Uuid) -> Result<Option<Session>> {
    let id_str = encode_uuid(id);

    let raw: Option<(String, Option<String>, Vec<(String, bool)>)> = self
      .conn
      .call(move |conn| {
        let header: Option<(String, Option<String>)> = conn
          .query_row(
            "SELECT session_id, scheduled_at FROM sessions WHERE session_id = ?1",
            rusqlite::params![id_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;

        let Some((session_id, scheduled_at)) = header else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT legislator_id, present FROM presences WHERE session_id = ?1",
        )?;
        let presences = stmt
          .query_map(rusqlite::params![session_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((session_id, scheduled_at, presences)))
      })
      .await?;

    let Some((session_id, scheduled_at, presences)) = raw else {
      return Ok(None);
    };

    Ok(Some(Session {
      session_id: decode_uuid(&session_id)?,
      scheduled_at: scheduled_at.as_deref().map(decode_dt).transpose()?,
      presences: presences
        .into_iter()
        .map(|(legislator_id, present)| {
          Ok(Presence {
            legislator_id: decode_uuid(&legislator_id)?,
            present,
          })
        })
        .collect::<Result<Vec<_>>>()?,
    }))
  }

  async fn get_proposal(&self, id: Uuid) -> Result<Option<Proposal>> {
    let id_str = encode_uuid(id);

    let raw: Option<(RawProposal, Vec<RawRoutingStep>)> = self
      .conn
      .call(move |conn| {
        let header: Option<RawProposal> = conn
          .query_row(
            "SELECT proposal_id, kind, summary, author_id, status, vote_date, updated_at
             FROM proposals WHERE proposal_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawProposal {
                proposal_id: row.get(0)?,
                kind:        row.get(1)?,
                summary:     row.get(2)?,
                author_id:   row.get(3)?,
                status:      row.get(4)?,
                vote_date:   row.get(5)?,
                updated_at:  row.get(6)?,
              })
            },
          )
          .optional()?;

        let Some(header) = header else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT r.created_at, u.name, u.kind, r.opinion_json
           FROM routing_steps r
           LEFT JOIN units u ON u.unit_id = r.unit_id
           WHERE r.proposal_id = ?1
           ORDER BY r.created_at DESC",
        )?;
        let steps = stmt
          .query_map(rusqlite::params![header.proposal_id], |row| {
            Ok(RawRoutingStep {
              created_at:   row.get(0)?,
              unit_name:    row.get(1)?,
              unit_kind:    row.get(2)?,
              opinion_json: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((header, steps)))
      })
      .await?;

    let Some((header, steps)) = raw else {
      return Ok(None);
    };

    let routing = steps
      .into_iter()
      .map(RawRoutingStep::into_step)
      .collect::<Result<Vec<_>>>()?;

    header.into_proposal(routing).map(Some)
  }

  async fn list_pending_proposals(&self, limit: usize) -> Result<Vec<Uuid>> {
    let limit_val = limit as i64;

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT proposal_id FROM proposals
           WHERE status = 'EM_TRAMITACAO'
           ORDER BY updated_at ASC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    ids.iter().map(|s| decode_uuid(s)).collect()
  }
}

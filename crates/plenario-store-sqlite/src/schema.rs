//! SQL schema for the Plenário SQLite read model.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS legislators (
    legislator_id TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    active        INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id   TEXT PRIMARY KEY,
    scheduled_at TEXT             -- RFC 3339 UTC or NULL
);

CREATE TABLE IF NOT EXISTS presences (
    session_id    TEXT NOT NULL REFERENCES sessions(session_id),
    legislator_id TEXT NOT NULL REFERENCES legislators(legislator_id),
    present       INTEGER NOT NULL,
    PRIMARY KEY (session_id, legislator_id)
);

CREATE TABLE IF NOT EXISTS units (
    unit_id TEXT PRIMARY KEY,
    name    TEXT NOT NULL,
    kind    TEXT NOT NULL         -- 'COMISSAO' | 'MESA' | 'PLENARIO' | 'EXECUTIVO' | 'OUTRO'
);

CREATE TABLE IF NOT EXISTS proposals (
    proposal_id TEXT PRIMARY KEY,
    kind        TEXT NOT NULL,    -- upstream matter token, e.g. 'PROJETO_DE_LEI'
    summary     TEXT NOT NULL,
    author_id   TEXT REFERENCES legislators(legislator_id),  -- NULL = executive origin
    status      TEXT NOT NULL,    -- 'EM_TRAMITACAO' | 'APROVADA' | ...
    vote_date   TEXT,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS routing_steps (
    step_id      TEXT PRIMARY KEY,
    proposal_id  TEXT NOT NULL REFERENCES proposals(proposal_id),
    unit_id      TEXT REFERENCES units(unit_id),
    opinion_json TEXT,            -- JSON-encoded Opinion or NULL
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS routing_proposal_idx ON routing_steps(proposal_id, created_at);
CREATE INDEX IF NOT EXISTS proposals_status_idx ON proposals(status);

PRAGMA user_version = 1;
";

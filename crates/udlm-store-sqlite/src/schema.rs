//! SQL schema for the UDLM SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Dates are `YYYY-MM-DD` text and reminder timestamps fixed-width ISO 8601
/// text, so `ORDER BY` on the raw column is chronological.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE TABLE IF NOT EXISTS subscriptions (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id           INTEGER NOT NULL REFERENCES users(id),
    name              TEXT NOT NULL,
    provider          TEXT,            -- Netflix, Spotify, ...
    amount            REAL,
    currency          TEXT NOT NULL DEFAULT 'INR',
    billing_cycle     TEXT NOT NULL CHECK (billing_cycle <> ''),  -- monthly | yearly
    next_payment_date TEXT,
    auto_detected     INTEGER NOT NULL DEFAULT 0,
    is_active         INTEGER NOT NULL DEFAULT 1,
    notes             TEXT
);

CREATE TABLE IF NOT EXISTS reminders (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users(id),
    title        TEXT NOT NULL,
    description  TEXT,
    due_at       TEXT NOT NULL,
    repeat_cycle TEXT,                 -- monthly | yearly | none
    category     TEXT,                 -- rent | bill | warranty | ...
    completed    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS documents (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users(id),
    filename     TEXT NOT NULL,
    doc_type     TEXT,                 -- Aadhaar, PAN, Marksheet, ...
    expiry_date  TEXT,
    storage_path TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS password_entries (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id            INTEGER NOT NULL REFERENCES users(id),
    service            TEXT NOT NULL,
    username           TEXT NOT NULL,
    encrypted_password TEXT NOT NULL,
    strength_score     INTEGER CHECK (strength_score BETWEEN 0 AND 100),
    breached           INTEGER NOT NULL DEFAULT 0,
    created_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS subscriptions_user_idx    ON subscriptions(user_id);
CREATE INDEX IF NOT EXISTS reminders_user_idx        ON reminders(user_id);
CREATE INDEX IF NOT EXISTS documents_user_idx        ON documents(user_id);
CREATE INDEX IF NOT EXISTS password_entries_user_idx ON password_entries(user_id);

PRAGMA user_version = 1;
";

//! SQL schema for the jokebook SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`, so an
/// existing database is opened as-is.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Jokes are append-only. No UPDATE or DELETE is issued against this table.
CREATE TABLE IF NOT EXISTS jokes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    category  TEXT NOT NULL CHECK (category <> ''),
    setup     TEXT NOT NULL CHECK (setup    <> ''),
    delivery  TEXT NOT NULL CHECK (delivery <> '')
);

CREATE INDEX IF NOT EXISTS jokes_category_idx ON jokes(category);

PRAGMA user_version = 1;
";

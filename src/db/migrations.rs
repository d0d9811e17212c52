use anyhow::Result;
use log::debug;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    debug!("running migrations");
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS katas (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
            url         TEXT NOT NULL DEFAULT '',
            created_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS completions (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            kata_id  INTEGER NOT NULL REFERENCES katas(id),
            date     TEXT NOT NULL,
            UNIQUE(kata_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_kata ON completions(kata_id, date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}

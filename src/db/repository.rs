use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::KataError;
use crate::models::{DATE_FORMAT, Kata, NewKata};

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).with_context(|| format!("Bad completion date '{}'", s))
}

// ─── Kata repo ───────────────────────────────────────────────────────────────

pub struct KataRepo;

impl KataRepo {
    /// All katas in the order they were added, each with its history.
    pub fn list(conn: &Connection) -> Result<Vec<Kata>> {
        let mut stmt = conn.prepare("SELECT id, name, url FROM katas ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, name, url) = r?;
            result.push(Kata {
                id,
                name,
                url,
                done: CompletionRepo::dates_for(conn, id)?,
            });
        }
        Ok(result)
    }

    /// Case-insensitive lookup.
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Kata>> {
        let row = conn
            .query_row(
                "SELECT id, name, url FROM katas WHERE name = ?1",
                params![name.trim()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((id, name, url)) => Ok(Some(Kata {
                id,
                name,
                url,
                done: CompletionRepo::dates_for(conn, id)?,
            })),
        }
    }

    pub fn add(conn: &Connection, kata: &NewKata) -> Result<i64> {
        let name = kata.name.trim();
        if name.is_empty() {
            return Err(KataError::EmptyName.into());
        }
        if Self::find_by_name(conn, name)?.is_some() {
            return Err(KataError::AlreadyTracked { name: name.to_string() }.into());
        }
        conn.execute(
            "INSERT INTO katas (name, url) VALUES (?1, ?2)",
            params![name, kata.url.trim()],
        )?;
        let id = conn.last_insert_rowid();
        debug!("added kata {} with id {}", name, id);
        Ok(id)
    }

    /// Stop tracking a kata and drop its completion history.
    pub fn remove(conn: &Connection, name: &str) -> Result<Kata> {
        let kata = Self::find_by_name(conn, name)?
            .ok_or_else(|| KataError::NotFound { name: name.to_string() })?;

        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM completions WHERE kata_id = ?1", params![kata.id])?;
        tx.execute("DELETE FROM katas WHERE id = ?1", params![kata.id])?;
        tx.commit()?;
        debug!("removed kata {} and {} completions", kata.name, kata.times_done());
        Ok(kata)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM katas", [], |row| row.get(0))
            .map_err(anyhow::Error::from)
    }
}

// ─── Completion repo ─────────────────────────────────────────────────────────

pub struct CompletionRepo;

impl CompletionRepo {
    /// Returns false when the kata already has a completion on `date`.
    pub fn record(conn: &Connection, kata_id: i64, date: NaiveDate) -> Result<bool> {
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO completions (kata_id, date) VALUES (?1, ?2)",
            params![kata_id, date.format(DATE_FORMAT).to_string()],
        )?;
        Ok(inserted > 0)
    }

    /// Completion dates of a kata, oldest first.
    pub fn dates_for(conn: &Connection, kata_id: i64) -> Result<Vec<NaiveDate>> {
        let mut stmt =
            conn.prepare("SELECT date FROM completions WHERE kata_id = ?1 ORDER BY date, id")?;

        let dates: Vec<String> = stmt
            .query_map(params![kata_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        dates.iter().map(|s| parse_date(s)).collect()
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn new_kata(name: &str) -> NewKata {
        NewKata {
            name: name.to_string(),
            url: format!("https://example.com/{}", name),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn add_and_list_in_insertion_order() {
        let conn = setup();
        KataRepo::add(&conn, &new_kata("wordwrap")).unwrap();
        KataRepo::add(&conn, &new_kata("anagrams")).unwrap();

        let katas = KataRepo::list(&conn).unwrap();
        let names: Vec<_> = katas.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["wordwrap", "anagrams"]);
        assert!(katas.iter().all(|k| k.done.is_empty()));
        assert_eq!(KataRepo::count(&conn).unwrap(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let conn = setup();
        KataRepo::add(&conn, &new_kata("WordWrap")).unwrap();
        let err = KataRepo::add(&conn, &new_kata("wordwrap")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<KataError>(),
            Some(&KataError::AlreadyTracked { name: "wordwrap".to_string() })
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let conn = setup();
        let err = KataRepo::add(&conn, &new_kata("  ")).unwrap_err();
        assert_eq!(err.downcast_ref::<KataError>(), Some(&KataError::EmptyName));
    }

    #[test]
    fn find_by_name_ignores_case() {
        let conn = setup();
        KataRepo::add(&conn, &new_kata("Bowling")).unwrap();
        let found = KataRepo::find_by_name(&conn, "bowling").unwrap().unwrap();
        assert_eq!(found.name, "Bowling");
        assert!(KataRepo::find_by_name(&conn, "tennis").unwrap().is_none());
    }

    #[test]
    fn completions_come_back_in_date_order() {
        let conn = setup();
        let id = KataRepo::add(&conn, &new_kata("bowling")).unwrap();
        assert!(CompletionRepo::record(&conn, id, date(10)).unwrap());
        assert!(CompletionRepo::record(&conn, id, date(3)).unwrap());
        assert!(!CompletionRepo::record(&conn, id, date(10)).unwrap());

        assert_eq!(CompletionRepo::dates_for(&conn, id).unwrap(), [date(3), date(10)]);
        let kata = KataRepo::find_by_name(&conn, "bowling").unwrap().unwrap();
        assert_eq!(kata.times_done(), 2);
        assert_eq!(kata.last_done(), Some(date(10)));
    }

    #[test]
    fn remove_drops_history() {
        let conn = setup();
        let id = KataRepo::add(&conn, &new_kata("bowling")).unwrap();
        CompletionRepo::record(&conn, id, date(1)).unwrap();

        let removed = KataRepo::remove(&conn, "BOWLING").unwrap();
        assert_eq!(removed.times_done(), 1);
        assert_eq!(KataRepo::count(&conn).unwrap(), 0);
        assert!(CompletionRepo::dates_for(&conn, id).unwrap().is_empty());

        let err = KataRepo::remove(&conn, "bowling").unwrap_err();
        assert!(matches!(err.downcast_ref::<KataError>(), Some(KataError::NotFound { .. })));
    }

    #[test]
    fn meta_roundtrip() {
        let conn = setup();
        assert_eq!(MetaRepo::get(&conn, "initialized").unwrap(), None);
        MetaRepo::set(&conn, "initialized", "1").unwrap();
        MetaRepo::set(&conn, "initialized", "2").unwrap();
        assert_eq!(MetaRepo::get(&conn, "initialized").unwrap().as_deref(), Some("2"));
    }
}

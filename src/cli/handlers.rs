use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::{AppConfig, default_katas};
use crate::db::{CompletionRepo, KataRepo, MetaRepo};
use crate::error::KataError;
use crate::mastery::{self, Mastery};
use crate::models::{Kata, NewKata, Summary};
use crate::utils::format::{Table, format_days_ago, format_times};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($enabled:expr, $color:expr, $($arg:tt)*) => {{
        if $enabled {
            print!("{}", $color);
            print!($($arg)*);
            println!("\x1b[0m");
        } else {
            println!($($arg)*);
        }
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";

const INITIALIZED_KEY: &str = "initialized";

// ─── Init ────────────────────────────────────────────────────────────────────

/// Add the given katas, skipping names already tracked. Returns how many were added.
pub fn seed_katas(conn: &Connection, katas: &[NewKata], force: bool) -> Result<usize> {
    if !force && MetaRepo::get(conn, INITIALIZED_KEY)?.as_deref() == Some("1") {
        return Err(KataError::AlreadyInitialized.into());
    }

    let mut added = 0;
    for kata in katas {
        if KataRepo::find_by_name(conn, &kata.name)?.is_some() {
            debug!("skipping {}, already tracked", kata.name);
            continue;
        }
        KataRepo::add(conn, kata)?;
        added += 1;
    }
    MetaRepo::set(conn, INITIALIZED_KEY, "1")?;
    Ok(added)
}

pub fn handle_init(conn: &Connection, config: &AppConfig, force: bool) -> Result<()> {
    let defaults = default_katas()?;
    let added = seed_katas(conn, &defaults, force)?;
    info!("seeded {} of {} built-in katas", added, defaults.len());
    let total = KataRepo::count(conn)?;
    println_colored!(
        config.display.color,
        GREEN,
        "  ✓ Tracking {} new katas ({} in total)",
        added,
        total
    );
    Ok(())
}

// ─── Done ────────────────────────────────────────────────────────────────────

/// Record a completion of `name` on `today`. A kata can be done once per day.
pub fn mark_done(conn: &Connection, name: &str, today: NaiveDate) -> Result<Kata> {
    let mut kata = KataRepo::find_by_name(conn, name)?
        .ok_or_else(|| KataError::NotFound { name: name.to_string() })?;

    if kata.is_done_on(today) || !CompletionRepo::record(conn, kata.id, today)? {
        return Err(KataError::AlreadyDoneToday { name: kata.name }.into());
    }
    kata.done.push(today);
    kata.done.sort();
    Ok(kata)
}

pub fn handle_done(conn: &Connection, config: &AppConfig, name: &str, now: NaiveDateTime) -> Result<()> {
    let kata = mark_done(conn, name, now.date())?;
    let level = kata.mastery(now);
    println_colored!(
        config.display.color,
        GREEN,
        "  ✓ {} marked as done ({}) {}",
        kata.name,
        format_times(kata.times_done()),
        level
    );
    Ok(())
}

// ─── Add / remove ────────────────────────────────────────────────────────────

pub fn handle_add(conn: &Connection, config: &AppConfig, name: &str, url: &str) -> Result<()> {
    let kata = NewKata {
        name: name.to_string(),
        url: url.to_string(),
    };
    KataRepo::add(conn, &kata)?;
    println_colored!(config.display.color, GREEN, "  ✓ Added kata: {}", kata.name.trim());
    Ok(())
}

pub fn handle_remove(conn: &Connection, config: &AppConfig, name: &str) -> Result<()> {
    let kata = KataRepo::remove(conn, name)?;
    println_colored!(
        config.display.color,
        AMBER,
        "  Removed {} ({} completions forgotten)",
        kata.name,
        kata.times_done()
    );
    Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

/// Render the status table followed by a totals row.
pub fn render_katas(katas: &[Kata], now: NaiveDateTime, show_urls: bool) -> String {
    let with_url = |mut cells: Vec<String>, url: &str| {
        if show_urls {
            cells.push(url.to_string());
        }
        cells
    };

    let mut table = Table::new(with_url(
        vec!["Kata".into(), "Last done".into(), "Done".into(), "Mastery".into()],
        "URL",
    ));
    table.push_rule();

    for kata in katas {
        table.push(with_url(
            vec![
                kata.name.clone(),
                format_days_ago(kata.days_since_last(now)),
                format_times(kata.times_done()),
                kata.mastery(now).to_string(),
            ],
            &kata.url,
        ));
    }

    let summary = Summary::from_katas(katas, now);
    let latest = summary
        .last_done
        .map(|d| mastery::days_between(d.and_time(NaiveTime::MIN), now));

    table.push(["----", "", "----", "-------"]);
    table.push([
        summary.katas.to_string(),
        if latest.is_some() { format_days_ago(latest) } else { String::new() },
        format_times(summary.total_done),
        summary.average_mastery.to_string(),
    ]);
    table.render()
}

pub fn handle_list(conn: &Connection, config: &AppConfig, now: NaiveDateTime) -> Result<()> {
    let katas = KataRepo::list(conn)?;
    if katas.is_empty() {
        println_colored!(
            config.display.color,
            DIM,
            "  No katas tracked yet. Run `katas init` or `katas add <name> <url>`."
        );
        return Ok(());
    }
    print!("{}", render_katas(&katas, now, config.display.show_urls));
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ExportedKata<'a> {
    name: &'a str,
    url: &'a str,
    times_done: usize,
    last_done: Option<NaiveDate>,
    mastery: Mastery,
    done: &'a [NaiveDate],
}

#[derive(Debug, Serialize)]
struct Export<'a> {
    generated_at: NaiveDateTime,
    katas: Vec<ExportedKata<'a>>,
    summary: Summary,
}

pub fn export_json(katas: &[Kata], now: NaiveDateTime) -> Result<String> {
    let export = Export {
        generated_at: now,
        katas: katas
            .iter()
            .map(|k| ExportedKata {
                name: &k.name,
                url: &k.url,
                times_done: k.times_done(),
                last_done: k.last_done(),
                mastery: k.mastery(now),
                done: &k.done,
            })
            .collect(),
        summary: Summary::from_katas(katas, now),
    };
    serde_json::to_string_pretty(&export).context("Serializing export")
}

pub fn handle_export(conn: &Connection, now: NaiveDateTime) -> Result<()> {
    let katas = KataRepo::list(conn)?;
    println!("{}", export_json(&katas, now)?);
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, write: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if write {
        if path.exists() {
            println_colored!(config.display.color, AMBER, "  Config already exists at {:?}", path);
        } else {
            config.save()?;
            println_colored!(config.display.color, GREEN, "  ✓ Wrote {:?}", path);
        }
    }
    println!("# {}", path.display());
    println!("# database: {}", config.db_path()?.display());
    print!("{}", toml::to_string_pretty(config).context("Serializing config")?);
    Ok(())
}

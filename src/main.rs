mod cli;
mod config;
mod db;
mod error;
mod mastery;
mod models;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::debug;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    if let Some(Commands::Config { write }) = cli.command {
        return handlers::handle_config(&config, write);
    }

    let db_path = config.ensure_db_dir()?;
    debug!("opening database at {:?}", db_path);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    run_migrations(&conn)?;

    // read the clock once; everything below works from this instant
    let now = Local::now().naive_local();

    match cli.command.unwrap_or(Commands::List) {
        Commands::Init { force } => handlers::handle_init(&conn, &config, force)?,
        Commands::Done { kata } => handlers::handle_done(&conn, &config, &kata, now)?,
        Commands::Add { name, url } => handlers::handle_add(&conn, &config, &name, &url)?,
        Commands::Remove { name } => handlers::handle_remove(&conn, &config, &name)?,
        Commands::List => handlers::handle_list(&conn, &config, now)?,
        Commands::Export => handlers::handle_export(&conn, now)?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}

//! Config commands
//!
//! Show where cinestat keeps its data and how it is configured.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use cinestat_core::db::{resolve_db_path, DB_PATH_ENV};
use cinestat_core::source::{FILMS_COLLECTION, HIGH_METASCORE_AND_REVENUE_VIEW};

use super::Context;
use crate::output::{print_info, print_output};

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx),
        ConfigAction::Get { key } => get_config(ctx, &key),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let rows = get_all_config()?;
    print_output(&rows, ctx.format)
}

fn get_config(ctx: &Context, key: &str) -> Result<()> {
    let rows = get_all_config()?;

    match rows.iter().find(|r| r.key.eq_ignore_ascii_case(key)) {
        Some(row) => {
            print_info(&format!("{} = {}", row.key, row.value), ctx.quiet);
            Ok(())
        }
        None => Err(anyhow::anyhow!("Config key not found: {}", key)),
    }
}

fn get_all_config() -> Result<Vec<ConfigRow>> {
    let mut rows = Vec::new();

    let (db_path, db_source) = resolve_db_path()?;
    rows.push(ConfigRow {
        key: DB_PATH_ENV.to_string(),
        value: db_path.to_string_lossy().to_string(),
        source: db_source.as_str().to_string(),
    });

    rows.push(ConfigRow {
        key: "collection".to_string(),
        value: FILMS_COLLECTION.to_string(),
        source: "built-in".to_string(),
    });

    rows.push(ConfigRow {
        key: "view".to_string(),
        value: HIGH_METASCORE_AND_REVENUE_VIEW.to_string(),
        source: "built-in".to_string(),
    });

    let (filter, source) = log_filter(std::env::var("RUST_LOG").ok());
    rows.push(ConfigRow {
        key: "RUST_LOG".to_string(),
        value: filter,
        source: source.to_string(),
    });

    Ok(rows)
}

fn log_filter(env_value: Option<String>) -> (String, &'static str) {
    match env_value {
        Some(v) if !v.trim().is_empty() => (v, "env"),
        _ => (DEFAULT_LOG_FILTER.to_string(), "default"),
    }
}

//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod config;
pub mod import;
pub mod list;
pub mod run;
pub mod view;

use crate::output::OutputFormat;
use cinestat_core::Database;

/// Shared context for all commands
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Open the configured database
    pub async fn database(&self) -> anyhow::Result<Database> {
        Ok(Database::new().await?)
    }
}

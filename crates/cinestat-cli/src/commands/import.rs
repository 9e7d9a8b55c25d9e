//! Import command
//!
//! Loads a JSON array or JSON-lines export into the database.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::Path;

use cinestat_core::import::read_documents;

use super::Context;
use crate::output::{print_json, print_success, OutputFormat};

#[derive(Debug, Serialize)]
struct ImportSummary {
    file: String,
    imported: u64,
    total: i64,
    replaced: bool,
}

pub async fn execute(ctx: &Context, file: &Path, replace: bool) -> Result<()> {
    let docs = read_documents(file)
        .with_context(|| format!("Failed to read dataset {}", file.display()))?;

    let db = ctx.database().await?;
    let imported = db.import_documents(&docs, replace).await?;
    let total = db.count_films().await?;
    db.close().await;

    let summary = ImportSummary {
        file: file.display().to_string(),
        imported,
        total,
        replaced: replace,
    };

    match ctx.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => print_success(
            &format!(
                "Imported {} films from {} ({} in collection)",
                summary.imported, summary.file, summary.total
            ),
            ctx.quiet,
        ),
    }
    Ok(())
}

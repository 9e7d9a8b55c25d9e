//! View commands
//!
//! Define the high Metascore / high revenue view and list the films it
//! currently exposes.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use cinestat_core::source::HIGH_METASCORE_AND_REVENUE_VIEW;
use cinestat_core::{FieldValue, Film, FilmSource, ViewDefinition, ViewOutcome};

use super::Context;
use crate::output::{print_json, print_output, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum ViewAction {
    /// Create the view (no-op if it already exists)
    Create,

    /// List films visible through a view
    Show {
        /// View name
        #[arg(long, default_value = HIGH_METASCORE_AND_REVENUE_VIEW)]
        name: String,
    },
}

/// View film row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ViewFilmRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Metascore")]
    pub metascore: String,
    #[tabled(rename = "Revenue (M)")]
    pub revenue: String,
}

impl From<&Film> for ViewFilmRow {
    fn from(film: &Film) -> Self {
        let show = |value: &Option<FieldValue>| {
            value.as_ref().map(FieldValue::display).unwrap_or_default()
        };
        Self {
            title: film.title_text(),
            year: show(&film.year),
            metascore: show(&film.metascore),
            revenue: show(&film.revenue_millions),
        }
    }
}

pub async fn execute(ctx: &Context, action: ViewAction) -> Result<()> {
    match action {
        ViewAction::Create => create_view(ctx).await,
        ViewAction::Show { name } => show_view(ctx, &name).await,
    }
}

async fn create_view(ctx: &Context) -> Result<()> {
    let definition = ViewDefinition::high_metascore_and_revenue();
    let db = ctx.database().await?;
    let outcome = db.create_view(&definition).await?;
    db.close().await;

    if ctx.format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "name": definition.name,
            "outcome": outcome,
        }));
    }

    let message = match outcome {
        ViewOutcome::Created => format!("Created view {}", definition.name),
        ViewOutcome::AlreadyExists => format!("View {} already exists", definition.name),
    };
    print_success(&message, ctx.quiet);
    Ok(())
}

async fn show_view(ctx: &Context, name: &str) -> Result<()> {
    let db = ctx.database().await?;
    let films = db.view_films(name).await?;
    db.close().await;

    let rows: Vec<ViewFilmRow> = films.iter().map(ViewFilmRow::from).collect();
    print_output(&rows, ctx.format)
}

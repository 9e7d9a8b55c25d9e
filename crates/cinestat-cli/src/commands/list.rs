//! Report menu

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use cinestat_core::ReportKind;

use super::Context;
use crate::output::print_output;

#[derive(Debug, Serialize, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "#")]
    pub number: u8,
    #[tabled(rename = "Name")]
    pub slug: String,
    #[tabled(rename = "Report")]
    pub title: String,
    #[tabled(rename = "Writes")]
    pub writes: bool,
}

impl From<ReportKind> for ReportRow {
    fn from(kind: ReportKind) -> Self {
        Self {
            number: kind.number(),
            slug: kind.slug().to_string(),
            title: kind.title().to_string(),
            writes: kind.is_mutating(),
        }
    }
}

pub fn execute(ctx: &Context) -> Result<()> {
    let rows: Vec<ReportRow> = ReportKind::ALL.into_iter().map(ReportRow::from).collect();
    print_output(&rows, ctx.format)
}

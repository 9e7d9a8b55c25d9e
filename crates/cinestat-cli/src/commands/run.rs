//! Run a single report
//!
//! Reports read the database by default or a JSON export passed with
//! `--file`. Table output uses one row type per report shape.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use cinestat_core::reports::{
    DecadeRuntime, DecadeTopFilms, DirectorCount, GenreLongestFilm, GenreRevenue, TopRevenueFilm,
    YearCount,
};
use cinestat_core::{MemorySource, ReportEngine, ReportKind, ReportOutput};

use super::Context;
use crate::output::{bar, decimal, print_info, print_json, print_output, OutputFormat, NO_RESULT};

/// Width of the films-per-year histogram
const HISTOGRAM_WIDTH: usize = 40;

#[derive(Debug, Serialize, Tabled)]
pub struct ValueRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct YearHistogramRow {
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Films")]
    pub films: i64,
    #[tabled(rename = "Histogram")]
    pub visual: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct GenreRow {
    #[tabled(rename = "Genre")]
    pub genre: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct TopRevenueRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Stored Revenue")]
    pub original: String,
    #[tabled(rename = "Revenue (M)")]
    pub numeric: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DirectorRow {
    #[tabled(rename = "Director")]
    pub director: String,
    #[tabled(rename = "Films")]
    pub films: i64,
}

#[derive(Debug, Serialize, Tabled)]
pub struct GenreRevenueRow {
    #[tabled(rename = "Genre")]
    pub genre: String,
    #[tabled(rename = "Avg Revenue (M)")]
    pub avg_revenue: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DecadeFilmRow {
    #[tabled(rename = "Decade")]
    pub decade: String,
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: i64,
    #[tabled(rename = "Metascore")]
    pub metascore: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct LongestFilmRow {
    #[tabled(rename = "Genre")]
    pub genre: String,
    #[tabled(rename = "Runtime (min)")]
    pub runtime: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Year")]
    pub year: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct DecadeRuntimeRow {
    #[tabled(rename = "Decade")]
    pub decade: String,
    #[tabled(rename = "Avg Runtime (min)")]
    pub avg_runtime: String,
}

pub async fn execute(ctx: &Context, kind: ReportKind, file: Option<PathBuf>) -> Result<()> {
    let output = match file {
        Some(path) => {
            let source = MemorySource::from_path(&path)?;
            log::info!("Loaded {} films from {}", source.len(), path.display());
            ReportEngine::new(&source).run(kind).await?
        }
        None => {
            let db = ctx.database().await?;
            let output = ReportEngine::new(&db).run(kind).await?;
            db.close().await;
            output
        }
    };

    render(ctx, kind, &output)
}

fn render(ctx: &Context, kind: ReportKind, output: &ReportOutput) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(output);
    }

    print_info(&format!("{}. {}", kind.number(), kind.title()), ctx.quiet);
    if output.is_empty() {
        println!("{}", NO_RESULT);
        return Ok(());
    }

    let format = ctx.format;
    match output {
        ReportOutput::MostProlificYear(yc) => print_output(&[most_prolific_row(yc)], format),
        ReportOutput::CountAfter1999(count) => {
            print_output(&[value_row("Films after 1999", count.to_string())], format)
        }
        ReportOutput::AverageVotes2007(avg) => print_output(
            &[value_row("Average votes (2007)", avg.map(decimal).unwrap_or_default())],
            format,
        ),
        ReportOutput::FilmsPerYear(rows) => print_output(&histogram_rows(rows), format),
        ReportOutput::DistinctGenres(genres) => {
            let rows: Vec<GenreRow> = genres
                .iter()
                .map(|genre| GenreRow {
                    genre: genre.clone(),
                })
                .collect();
            print_output(&rows, format)
        }
        ReportOutput::TopRevenueFilm(film) => {
            let rows: Vec<TopRevenueRow> = film.iter().map(top_revenue_row).collect();
            print_output(&rows, format)
        }
        ReportOutput::ProlificDirectors(rows) => {
            let rows: Vec<DirectorRow> = rows.iter().map(director_row).collect();
            print_output(&rows, format)
        }
        ReportOutput::TopGenreByRevenue(genre) => {
            let rows: Vec<GenreRevenueRow> = genre.iter().map(genre_revenue_row).collect();
            print_output(&rows, format)
        }
        ReportOutput::TopFilmsPerDecade(decades) => print_output(&decade_film_rows(decades), format),
        ReportOutput::LongestFilmPerGenre(rows) => {
            let rows: Vec<LongestFilmRow> = rows.iter().map(longest_film_row).collect();
            print_output(&rows, format)
        }
        ReportOutput::CreateView(creation) => print_output(
            &[
                value_row("View", creation.name.clone()),
                value_row("Outcome", creation.outcome.as_str().to_string()),
            ],
            format,
        ),
        ReportOutput::RuntimeRevenueCorrelation(r) => print_output(
            &[value_row(
                "Pearson r (runtime, revenue)",
                r.map(|r| format!("{:.4}", r)).unwrap_or_default(),
            )],
            format,
        ),
        ReportOutput::AverageRuntimePerDecade(rows) => {
            let rows: Vec<DecadeRuntimeRow> = rows.iter().map(decade_runtime_row).collect();
            print_output(&rows, format)
        }
    }
}

fn value_row(metric: &str, value: String) -> ValueRow {
    ValueRow {
        metric: metric.to_string(),
        value,
    }
}

fn year_label(year: Option<i64>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "(none)".to_string())
}

fn most_prolific_row(yc: &YearCount) -> ValueRow {
    value_row(
        "Most prolific year",
        format!("{} ({} films)", year_label(yc.year), yc.count),
    )
}

fn histogram_rows(rows: &[YearCount]) -> Vec<YearHistogramRow> {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    rows.iter()
        .map(|r| YearHistogramRow {
            year: year_label(r.year),
            films: r.count,
            visual: bar(r.count, max, HISTOGRAM_WIDTH),
        })
        .collect()
}

fn top_revenue_row(film: &TopRevenueFilm) -> TopRevenueRow {
    TopRevenueRow {
        title: film.title.clone(),
        original: film.original_revenue.display(),
        numeric: decimal(film.numeric_revenue),
    }
}

fn director_row(row: &DirectorCount) -> DirectorRow {
    DirectorRow {
        director: row.director.clone(),
        films: row.count,
    }
}

fn genre_revenue_row(row: &GenreRevenue) -> GenreRevenueRow {
    GenreRevenueRow {
        genre: row.genre.clone(),
        avg_revenue: decimal(row.avg_revenue),
    }
}

fn decade_film_rows(decades: &[DecadeTopFilms]) -> Vec<DecadeFilmRow> {
    decades
        .iter()
        .flat_map(|d| {
            d.top_films.iter().enumerate().map(move |(idx, film)| DecadeFilmRow {
                decade: format!("{}s", d.decade),
                rank: idx + 1,
                title: film.title.clone(),
                year: film.year,
                metascore: format!("{}", film.metascore),
            })
        })
        .collect()
}

fn longest_film_row(row: &GenreLongestFilm) -> LongestFilmRow {
    LongestFilmRow {
        genre: row.genre.clone(),
        runtime: format!("{}", row.max_runtime),
        title: row.longest_film.title_text(),
        year: row
            .longest_film
            .year
            .as_ref()
            .map(|y| y.display())
            .unwrap_or_default(),
    }
}

fn decade_runtime_row(row: &DecadeRuntime) -> DecadeRuntimeRow {
    DecadeRuntimeRow {
        decade: format!("{}s", row.decade),
        avg_runtime: decimal(row.avg_runtime),
    }
}

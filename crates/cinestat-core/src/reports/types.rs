//! Report result types

use serde::{Deserialize, Serialize};

use crate::models::{FieldValue, Film};
use crate::source::ViewOutcome;

/// Film count for a release year (`None` = no whole-number year on record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: Option<i64>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorCount {
    pub director: String,
    pub count: i64,
}

/// Highest-grossing film, with the stored revenue next to its numeric form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRevenueFilm {
    pub title: String,
    pub original_revenue: FieldValue,
    pub numeric_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRevenue {
    pub genre: String,
    pub avg_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedFilm {
    pub title: String,
    pub metascore: f64,
    pub year: i64,
}

/// Best-rated films of a decade, highest Metascore first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeTopFilms {
    pub decade: i64,
    pub top_films: Vec<RatedFilm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreLongestFilm {
    pub genre: String,
    pub max_runtime: f64,
    pub longest_film: Film,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeRuntime {
    pub decade: i64,
    pub avg_runtime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCreation {
    pub name: String,
    pub outcome: ViewOutcome,
}

/// Typed result of any report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "report", content = "result", rename_all = "snake_case")]
pub enum ReportOutput {
    MostProlificYear(YearCount),
    CountAfter1999(i64),
    AverageVotes2007(Option<f64>),
    FilmsPerYear(Vec<YearCount>),
    DistinctGenres(Vec<String>),
    TopRevenueFilm(Option<TopRevenueFilm>),
    ProlificDirectors(Vec<DirectorCount>),
    TopGenreByRevenue(Option<GenreRevenue>),
    TopFilmsPerDecade(Vec<DecadeTopFilms>),
    LongestFilmPerGenre(Vec<GenreLongestFilm>),
    CreateView(ViewCreation),
    RuntimeRevenueCorrelation(Option<f64>),
    AverageRuntimePerDecade(Vec<DecadeRuntime>),
}

impl ReportOutput {
    /// Number of result rows; scalar results count as one row when present
    pub fn row_count(&self) -> usize {
        match self {
            ReportOutput::MostProlificYear(yc) => usize::from(yc.year.is_some()),
            ReportOutput::CountAfter1999(_) | ReportOutput::CreateView(_) => 1,
            ReportOutput::AverageVotes2007(v) | ReportOutput::RuntimeRevenueCorrelation(v) => {
                usize::from(v.is_some())
            }
            ReportOutput::FilmsPerYear(rows) => rows.len(),
            ReportOutput::DistinctGenres(rows) => rows.len(),
            ReportOutput::TopRevenueFilm(film) => usize::from(film.is_some()),
            ReportOutput::ProlificDirectors(rows) => rows.len(),
            ReportOutput::TopGenreByRevenue(genre) => usize::from(genre.is_some()),
            ReportOutput::TopFilmsPerDecade(rows) => rows.len(),
            ReportOutput::LongestFilmPerGenre(rows) => rows.len(),
            ReportOutput::AverageRuntimePerDecade(rows) => rows.len(),
        }
    }

    /// True when the report produced no data
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

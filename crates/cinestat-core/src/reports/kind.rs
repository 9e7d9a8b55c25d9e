//! Report catalogue
//!
//! The fixed menu of reports, addressable by number or slug.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

/// One of the thirteen named reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    MostProlificYear,
    CountAfter1999,
    AverageVotes2007,
    FilmsPerYear,
    DistinctGenres,
    TopRevenueFilm,
    ProlificDirectors,
    TopGenreByRevenue,
    TopFilmsPerDecade,
    LongestFilmPerGenre,
    CreateView,
    RuntimeRevenueCorrelation,
    AverageRuntimePerDecade,
}

impl ReportKind {
    /// Menu order
    pub const ALL: [ReportKind; 13] = [
        ReportKind::MostProlificYear,
        ReportKind::CountAfter1999,
        ReportKind::AverageVotes2007,
        ReportKind::FilmsPerYear,
        ReportKind::DistinctGenres,
        ReportKind::TopRevenueFilm,
        ReportKind::ProlificDirectors,
        ReportKind::TopGenreByRevenue,
        ReportKind::TopFilmsPerDecade,
        ReportKind::LongestFilmPerGenre,
        ReportKind::CreateView,
        ReportKind::RuntimeRevenueCorrelation,
        ReportKind::AverageRuntimePerDecade,
    ];

    /// 1-based menu number
    pub fn number(&self) -> u8 {
        match self {
            ReportKind::MostProlificYear => 1,
            ReportKind::CountAfter1999 => 2,
            ReportKind::AverageVotes2007 => 3,
            ReportKind::FilmsPerYear => 4,
            ReportKind::DistinctGenres => 5,
            ReportKind::TopRevenueFilm => 6,
            ReportKind::ProlificDirectors => 7,
            ReportKind::TopGenreByRevenue => 8,
            ReportKind::TopFilmsPerDecade => 9,
            ReportKind::LongestFilmPerGenre => 10,
            ReportKind::CreateView => 11,
            ReportKind::RuntimeRevenueCorrelation => 12,
            ReportKind::AverageRuntimePerDecade => 13,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.number() == number)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::MostProlificYear => "most-prolific-year",
            ReportKind::CountAfter1999 => "count-after-1999",
            ReportKind::AverageVotes2007 => "average-votes-2007",
            ReportKind::FilmsPerYear => "films-per-year",
            ReportKind::DistinctGenres => "distinct-genres",
            ReportKind::TopRevenueFilm => "top-revenue-film",
            ReportKind::ProlificDirectors => "prolific-directors",
            ReportKind::TopGenreByRevenue => "top-genre-by-revenue",
            ReportKind::TopFilmsPerDecade => "top-films-per-decade",
            ReportKind::LongestFilmPerGenre => "longest-film-per-genre",
            ReportKind::CreateView => "create-view",
            ReportKind::RuntimeRevenueCorrelation => "runtime-revenue-correlation",
            ReportKind::AverageRuntimePerDecade => "average-runtime-per-decade",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::MostProlificYear => "Most prolific year",
            ReportKind::CountAfter1999 => "Number of films released after 1999",
            ReportKind::AverageVotes2007 => "Average votes for 2007 films",
            ReportKind::FilmsPerYear => "Number of films per year",
            ReportKind::DistinctGenres => "Distinct genres",
            ReportKind::TopRevenueFilm => "Highest-grossing film",
            ReportKind::ProlificDirectors => "Directors with more than 5 films",
            ReportKind::TopGenreByRevenue => "Genre with the highest average revenue",
            ReportKind::TopFilmsPerDecade => "Top 3 films per decade (Metascore)",
            ReportKind::LongestFilmPerGenre => "Longest film per genre",
            ReportKind::CreateView => "Create the high_metascore_and_revenue_view view",
            ReportKind::RuntimeRevenueCorrelation => "Runtime / revenue correlation",
            ReportKind::AverageRuntimePerDecade => "Average runtime per decade",
        }
    }

    /// Whether running the report changes server-side state
    pub fn is_mutating(&self) -> bool {
        matches!(self, ReportKind::CreateView)
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return Self::from_number(number)
                .ok_or_else(|| Error::validation(format!("No report numbered {}. Use 1-13", number)));
        }

        let wanted = s.to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| Error::validation(format!("Unknown report: {}", s)))
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

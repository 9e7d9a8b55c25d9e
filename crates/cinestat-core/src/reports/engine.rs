//! Report engine
//!
//! Borrows a [`FilmSource`] and answers one report per call. Nothing is
//! cached between calls; every report reads the current collection state.

use super::aggregate;
use super::kind::ReportKind;
use super::types::{
    DecadeRuntime, DecadeTopFilms, DirectorCount, GenreLongestFilm, GenreRevenue, ReportOutput,
    TopRevenueFilm, ViewCreation, YearCount,
};
use crate::error::Result;
use crate::models::Film;
use crate::source::{FilmSource, ViewDefinition};

/// Films released strictly after this year are counted by report 2
pub const COUNT_AFTER_YEAR: i64 = 1999;

/// Release year averaged by report 3
pub const AVERAGE_VOTES_YEAR: i64 = 2007;

/// Runs named reports against a borrowed film source
pub struct ReportEngine<'a, S: FilmSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: FilmSource + ?Sized> ReportEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Run a report by kind
    pub async fn run(&self, kind: ReportKind) -> Result<ReportOutput> {
        log::debug!(
            "Running report {} ({}) on {} source",
            kind.number(),
            kind.slug(),
            self.source.source_name()
        );

        let output = match kind {
            ReportKind::MostProlificYear => {
                ReportOutput::MostProlificYear(self.most_prolific_year().await?)
            }
            ReportKind::CountAfter1999 => {
                ReportOutput::CountAfter1999(self.count_after_1999().await?)
            }
            ReportKind::AverageVotes2007 => {
                ReportOutput::AverageVotes2007(self.average_votes_2007().await?)
            }
            ReportKind::FilmsPerYear => ReportOutput::FilmsPerYear(self.films_per_year().await?),
            ReportKind::DistinctGenres => {
                ReportOutput::DistinctGenres(self.distinct_genres().await?)
            }
            ReportKind::TopRevenueFilm => {
                ReportOutput::TopRevenueFilm(self.top_revenue_film().await?)
            }
            ReportKind::ProlificDirectors => {
                ReportOutput::ProlificDirectors(self.prolific_directors().await?)
            }
            ReportKind::TopGenreByRevenue => {
                ReportOutput::TopGenreByRevenue(self.top_genre_by_average_revenue().await?)
            }
            ReportKind::TopFilmsPerDecade => {
                ReportOutput::TopFilmsPerDecade(self.top_films_per_decade().await?)
            }
            ReportKind::LongestFilmPerGenre => {
                ReportOutput::LongestFilmPerGenre(self.longest_film_per_genre().await?)
            }
            ReportKind::CreateView => ReportOutput::CreateView(self.create_view().await?),
            ReportKind::RuntimeRevenueCorrelation => {
                ReportOutput::RuntimeRevenueCorrelation(self.runtime_revenue_correlation().await?)
            }
            ReportKind::AverageRuntimePerDecade => {
                ReportOutput::AverageRuntimePerDecade(self.average_runtime_per_decade().await?)
            }
        };

        log::info!("Report {} returned {} row(s)", kind.slug(), output.row_count());
        Ok(output)
    }

    async fn films(&self) -> Result<Vec<Film>> {
        self.source.films().await
    }

    /// 1. Year with the most releases
    pub async fn most_prolific_year(&self) -> Result<YearCount> {
        Ok(aggregate::most_prolific_year(&self.films().await?))
    }

    /// 2. Films released after 1999
    pub async fn count_after_1999(&self) -> Result<i64> {
        self.source.count_released_after(COUNT_AFTER_YEAR).await
    }

    /// 3. Mean votes of 2007 releases
    pub async fn average_votes_2007(&self) -> Result<Option<f64>> {
        Ok(aggregate::average_votes_for_year(
            &self.films().await?,
            AVERAGE_VOTES_YEAR,
        ))
    }

    /// 4. Films per year, ascending
    pub async fn films_per_year(&self) -> Result<Vec<YearCount>> {
        Ok(aggregate::films_per_year(&self.films().await?))
    }

    /// 5. Distinct genre names
    pub async fn distinct_genres(&self) -> Result<Vec<String>> {
        Ok(aggregate::distinct_genres(&self.films().await?))
    }

    /// 6. Highest-grossing film
    pub async fn top_revenue_film(&self) -> Result<Option<TopRevenueFilm>> {
        Ok(aggregate::top_revenue_film(&self.films().await?))
    }

    /// 7. Directors with more than five films
    pub async fn prolific_directors(&self) -> Result<Vec<DirectorCount>> {
        Ok(aggregate::prolific_directors(&self.films().await?))
    }

    /// 8. Genre with the best average revenue
    pub async fn top_genre_by_average_revenue(&self) -> Result<Option<GenreRevenue>> {
        Ok(aggregate::top_genre_by_average_revenue(&self.films().await?))
    }

    /// 9. Top three films per decade by Metascore
    pub async fn top_films_per_decade(&self) -> Result<Vec<DecadeTopFilms>> {
        Ok(aggregate::top_films_per_decade(&self.films().await?))
    }

    /// 10. Longest film of each genre
    pub async fn longest_film_per_genre(&self) -> Result<Vec<GenreLongestFilm>> {
        Ok(aggregate::longest_film_per_genre(&self.films().await?))
    }

    /// 11. Define the high Metascore / high revenue view
    ///
    /// Safe to repeat: an existing view is reported, not recreated.
    pub async fn create_view(&self) -> Result<ViewCreation> {
        let definition = ViewDefinition::high_metascore_and_revenue();
        let outcome = self.source.create_view(&definition).await?;
        Ok(ViewCreation {
            name: definition.name,
            outcome,
        })
    }

    /// 12. Pearson correlation between runtime and revenue
    pub async fn runtime_revenue_correlation(&self) -> Result<Option<f64>> {
        let pairs = self.source.runtime_revenue_pairs().await?;
        log::debug!("Correlating {} runtime/revenue pairs", pairs.len());
        Ok(aggregate::pearson(&pairs))
    }

    /// 13. Mean runtime per decade
    pub async fn average_runtime_per_decade(&self) -> Result<Vec<DecadeRuntime>> {
        Ok(aggregate::average_runtime_per_decade(&self.films().await?))
    }
}

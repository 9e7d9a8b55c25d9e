//! Film Data Source Abstraction
//!
//! The report engine never talks to storage directly. It borrows something
//! that implements [`FilmSource`] and asks it for the few primitive
//! operations the reports need.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ ReportEngine<'_, S>                                 │
//! │   films() ──► in-process grouping / sorting         │
//! │   count_released_after(), runtime_revenue_pairs()   │
//! │   create_view(), view_films()                       │
//! └─────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ trait FilmSource                                    │
//! └─────────────────────────────────────────────────────┘
//!          │
//!     ┌────┴─────┐
//!     ▼          ▼
//! ┌────────┐ ┌──────────────┐
//! │ SQLite │ │ MemorySource │
//! └────────┘ └──────────────┘
//! ```

pub mod memory;
pub mod types;

pub use memory::MemorySource;
pub use types::{
    is_identifier, ViewDefinition, ViewOutcome, FILMS_COLLECTION, HIGH_METASCORE_AND_REVENUE_VIEW,
};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Film;

/// Trait for film data sources
///
/// Implementations own their connection or data; callers construct one at
/// startup and lend it to the report engine.
#[async_trait]
pub trait FilmSource: Send + Sync {
    /// Short label used in logs (e.g., "sqlite", "memory")
    fn source_name(&self) -> &'static str;

    /// Every film document in natural collection order
    async fn films(&self) -> Result<Vec<Film>>;

    /// Number of films whose whole-number `year` is strictly greater than `year`
    async fn count_released_after(&self, year: i64) -> Result<i64>;

    /// `(runtime, revenue)` for films where both attributes are stored as numbers
    async fn runtime_revenue_pairs(&self) -> Result<Vec<(f64, f64)>>;

    /// Define a named, read-only filtered view over the film collection
    ///
    /// Re-defining an existing view is not an error: it reports
    /// [`ViewOutcome::AlreadyExists`] and leaves the view untouched.
    async fn create_view(&self, definition: &ViewDefinition) -> Result<ViewOutcome>;

    /// Films visible through a previously defined view
    async fn view_films(&self, name: &str) -> Result<Vec<Film>>;
}

//! Report Engine
//!
//! Thirteen fixed reports over the film collection:
//! - `kind` - the report catalogue (numbers, slugs, menu titles)
//! - `aggregate` - pure grouping, ranking and statistics over film slices
//! - `engine` - [`ReportEngine`], which feeds a [`FilmSource`](crate::source::FilmSource) into them
//! - `types` - typed results and [`ReportOutput`]

pub mod aggregate;
pub mod engine;
pub mod kind;
pub mod types;

pub use engine::{ReportEngine, AVERAGE_VOTES_YEAR, COUNT_AFTER_YEAR};
pub use kind::ReportKind;
pub use types::*;

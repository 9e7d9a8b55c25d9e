//! # cinestat-core
//!
//! Core report engine for cinestat - film dataset analytics.
//!
//! This crate provides:
//! - Film document model and numeric coercion (`models` module)
//! - The data source abstraction and an in-memory source (`source` module)
//! - SQLite document storage (`db` module)
//! - Dataset parsing for imports (`import` module)
//! - The thirteen named reports (`reports` module)
//! - Unified error handling (`error` module)

pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod source;

// Re-exports for convenience
pub use db::Database;
pub use error::{Error, Result};
pub use models::{decade, FieldValue, Film};
pub use reports::{ReportEngine, ReportKind, ReportOutput};
pub use source::{FilmSource, MemorySource, ViewDefinition, ViewOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = version();
        // Should be semver format: x.y.z
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}

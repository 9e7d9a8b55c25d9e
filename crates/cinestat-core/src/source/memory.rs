//! In-memory film source
//!
//! Holds a fixed set of documents, e.g. loaded from a JSON export, and keeps
//! defined views in a small registry.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use super::{FilmSource, ViewDefinition, ViewOutcome};
use crate::error::{Error, Result};
use crate::import::read_documents;
use crate::models::Film;

/// Film source backed by an owned vector
#[derive(Debug, Default)]
pub struct MemorySource {
    films: Vec<Film>,
    views: Mutex<BTreeMap<String, ViewDefinition>>,
}

impl MemorySource {
    pub fn new(films: Vec<Film>) -> Self {
        Self {
            films,
            views: Mutex::new(BTreeMap::new()),
        }
    }

    /// Load a JSON array or JSON-lines file
    pub fn from_path(path: &Path) -> Result<Self> {
        let films = read_documents(path)?
            .into_iter()
            .map(Film::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(films))
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    fn lock_views(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, ViewDefinition>>> {
        self.views
            .lock()
            .map_err(|_| Error::internal("view registry lock poisoned"))
    }
}

#[async_trait]
impl FilmSource for MemorySource {
    fn source_name(&self) -> &'static str {
        "memory"
    }

    async fn films(&self) -> Result<Vec<Film>> {
        Ok(self.films.clone())
    }

    async fn count_released_after(&self, year: i64) -> Result<i64> {
        Ok(self
            .films
            .iter()
            .filter(|f| f.year().is_some_and(|y| y > year))
            .count() as i64)
    }

    async fn runtime_revenue_pairs(&self) -> Result<Vec<(f64, f64)>> {
        Ok(self
            .films
            .iter()
            .filter_map(|f| Some((f.runtime_number()?, f.revenue_number()?)))
            .collect())
    }

    async fn create_view(&self, definition: &ViewDefinition) -> Result<ViewOutcome> {
        definition.validate()?;
        let mut views = self.lock_views()?;
        if views.contains_key(&definition.name) {
            return Ok(ViewOutcome::AlreadyExists);
        }
        views.insert(definition.name.clone(), definition.clone());
        Ok(ViewOutcome::Created)
    }

    async fn view_films(&self, name: &str) -> Result<Vec<Film>> {
        let definition = self
            .lock_views()?
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("view {}", name)))?;

        Ok(self
            .films
            .iter()
            .filter(|f| definition.matches(f))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn film(year: i64, metascore: i64, revenue: f64) -> Film {
        Film {
            year: Some(FieldValue::Integer(year)),
            metascore: Some(FieldValue::Integer(metascore)),
            revenue_millions: Some(FieldValue::Real(revenue)),
            runtime_minutes: Some(FieldValue::Integer(100)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_count_released_after() {
        let source = MemorySource::new(vec![film(1999, 50, 1.0), film(2000, 50, 1.0)]);
        assert_eq!(source.count_released_after(1999).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_view_twice() {
        let source = MemorySource::new(vec![film(2010, 90, 120.0), film(2010, 60, 120.0)]);
        let def = ViewDefinition::high_metascore_and_revenue();

        assert_eq!(source.create_view(&def).await.unwrap(), ViewOutcome::Created);
        assert_eq!(source.create_view(&def).await.unwrap(), ViewOutcome::AlreadyExists);
        assert_eq!(source.view_films(&def.name).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_view_is_not_found() {
        let source = MemorySource::default();
        assert!(matches!(
            source.view_films("nope").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_runtime_revenue_pairs_skip_text() {
        let mut text_revenue = film(2010, 70, 0.0);
        text_revenue.revenue_millions = Some(FieldValue::from("12.5"));
        let source = MemorySource::new(vec![film(2010, 70, 10.0), text_revenue]);

        assert_eq!(source.runtime_revenue_pairs().await.unwrap(), vec![(100.0, 10.0)]);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("films.jsonl");
        std::fs::write(&path, "{\"title\": \"Up\", \"year\": 2009}\n").unwrap();

        let source = MemorySource::from_path(&path).unwrap();
        assert_eq!(source.len(), 1);
        assert!(!source.is_empty());
    }
}

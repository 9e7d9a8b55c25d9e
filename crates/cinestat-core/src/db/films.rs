//! Film document storage
//!
//! Import plus the [`FilmSource`] operations backed by SQLite.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::Film;
use crate::source::{is_identifier, FilmSource, ViewDefinition, ViewOutcome};

const YEAR_PATH: &str = "$.year";
const RUNTIME_PATH: &str = r#"$."Runtime (Minutes)""#;
const REVENUE_PATH: &str = r#"$."Revenue (Millions)""#;
const METASCORE_PATH: &str = "$.Metascore";

impl Database {
    /// Insert film documents in a single transaction.
    ///
    /// With `replace` the collection is emptied first. Returns the number of
    /// documents inserted.
    pub async fn import_documents(&self, docs: &[Value], replace: bool) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        if replace {
            let removed = sqlx::query("DELETE FROM films")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            log::info!("Cleared {} existing films", removed);
        }

        let mut inserted = 0u64;
        for doc in docs {
            // Reject anything the report engine could not read back
            Film::from_value(doc.clone())?;

            sqlx::query("INSERT INTO films (id, doc) VALUES (?, ?)")
                .bind(Uuid::new_v4().to_string())
                .bind(serde_json::to_string(doc)?)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }

        tx.commit().await?;
        log::info!("Imported {} films", inserted);
        Ok(inserted)
    }

    /// Insert already-typed films
    pub async fn insert_films(&self, films: &[Film]) -> Result<u64> {
        let docs = films
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.import_documents(&docs, false).await
    }

    pub async fn count_films(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM films")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Type of the schema object called `name`, if any
    async fn object_type(&self, name: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT type FROM sqlite_master WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(kind,)| kind))
    }
}

fn decode_films(rows: Vec<(String,)>) -> Result<Vec<Film>> {
    rows.into_iter()
        .map(|(doc,)| serde_json::from_str::<Film>(&doc).map_err(Error::from))
        .collect()
}

fn numeric(path: &str) -> String {
    format!("json_type(doc, '{}') IN ('integer', 'real')", path)
}

/// Numbers without a fractional part, e.g. `2007` or `2007.0`
fn whole_number(path: &str) -> String {
    format!(
        "{} AND json_extract(doc, '{path}') = CAST(json_extract(doc, '{path}') AS INTEGER)",
        numeric(path),
        path = path
    )
}

fn view_sql(definition: &ViewDefinition) -> String {
    format!(
        "CREATE VIEW IF NOT EXISTS {name} AS SELECT id, doc FROM {source} \
         WHERE {meta_numeric} AND json_extract(doc, '{meta}') > {meta_min} \
         AND {rev_numeric} AND json_extract(doc, '{rev}') > {rev_min}",
        name = definition.name,
        source = definition.view_on,
        meta_numeric = numeric(METASCORE_PATH),
        meta = METASCORE_PATH,
        meta_min = definition.metascore_above,
        rev_numeric = numeric(REVENUE_PATH),
        rev = REVENUE_PATH,
        rev_min = definition.revenue_above,
    )
}

#[async_trait]
impl FilmSource for Database {
    fn source_name(&self) -> &'static str {
        "sqlite"
    }

    async fn films(&self) -> Result<Vec<Film>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT doc FROM films ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        decode_films(rows)
    }

    async fn count_released_after(&self, year: i64) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM films WHERE {} AND json_extract(doc, '{}') > ?",
            whole_number(YEAR_PATH),
            YEAR_PATH
        );
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(year)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn runtime_revenue_pairs(&self) -> Result<Vec<(f64, f64)>> {
        let sql = format!(
            "SELECT CAST(json_extract(doc, '{rt}') AS REAL), CAST(json_extract(doc, '{rev}') AS REAL) \
             FROM films WHERE {rt_numeric} AND {rev_numeric} ORDER BY rowid",
            rt = RUNTIME_PATH,
            rev = REVENUE_PATH,
            rt_numeric = numeric(RUNTIME_PATH),
            rev_numeric = numeric(REVENUE_PATH),
        );
        let rows: Vec<(f64, f64)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create_view(&self, definition: &ViewDefinition) -> Result<ViewOutcome> {
        definition.validate()?;

        match self.object_type(&definition.name).await?.as_deref() {
            Some("view") => {
                log::info!("View {} already exists", definition.name);
                return Ok(ViewOutcome::AlreadyExists);
            }
            Some(other) => {
                return Err(Error::validation(format!(
                    "{} already names a {}",
                    definition.name, other
                )));
            }
            None => {}
        }

        sqlx::query(&view_sql(definition)).execute(&self.pool).await?;
        log::info!("Created view {} on {}", definition.name, definition.view_on);
        Ok(ViewOutcome::Created)
    }

    async fn view_films(&self, name: &str) -> Result<Vec<Film>> {
        if !is_identifier(name) {
            return Err(Error::validation(format!("Invalid view name: {}", name)));
        }
        if self.object_type(name).await?.as_deref() != Some("view") {
            return Err(Error::not_found(format!("view {}", name)));
        }

        let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT doc FROM {}", name))
            .fetch_all(&self.pool)
            .await?;
        decode_films(rows)
    }
}

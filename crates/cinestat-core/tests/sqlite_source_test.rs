//! Integration tests for the SQLite film store
//!
//! Every report is run against a temporary database and checked against the
//! in-memory source holding the same documents.

use cinestat_core::db::Database;
use cinestat_core::import::parse_documents;
use cinestat_core::reports::{ReportEngine, ReportKind, YearCount};
use cinestat_core::{
    Error, FieldValue, Film, FilmSource, MemorySource, ViewDefinition, ViewOutcome,
};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Helper to create a test database
async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::open(db_path).await.expect("Failed to create test database");
    (db, temp_dir)
}

fn dataset() -> Vec<Value> {
    vec![
        json!({"Rank": 1, "title": "Guardians of the Galaxy", "year": 2014,
               "genre": "Action,Adventure,Sci-Fi", "Director": "James Gunn",
               "Votes": 757074, "Revenue (Millions)": 333.13,
               "Runtime (Minutes)": 121, "Metascore": 76}),
        json!({"Rank": 2, "title": "Prometheus", "year": 2012,
               "genre": "Adventure,Mystery,Sci-Fi", "Director": "Ridley Scott",
               "Votes": 485820, "Revenue (Millions)": 126.46,
               "Runtime (Minutes)": 124, "Metascore": 65}),
        json!({"Rank": 3, "title": "The Dark Knight", "year": 2008,
               "genre": "Action,Crime,Drama", "Director": "Christopher Nolan",
               "Votes": 1791916, "Revenue (Millions)": 533.32,
               "Runtime (Minutes)": 152, "Metascore": 82}),
        json!({"Rank": 4, "title": "No Country for Old Men", "year": 2007,
               "genre": "Crime, Drama, Thriller", "Director": "Ethan Coen",
               "Votes": 660286, "Revenue (Millions)": 74.27,
               "Runtime (Minutes)": 122, "Metascore": 91}),
        json!({"Rank": 5, "title": "Juno", "year": 2007,
               "genre": "Comedy,Drama", "Director": "Jason Reitman",
               "Votes": 425350, "Revenue (Millions)": "143.49",
               "Runtime (Minutes)": 96, "Metascore": "81"}),
        json!({"Rank": 6, "title": "Hounds of Love", "year": 2016,
               "genre": "Crime,Drama,Horror", "Director": "Ben Young",
               "Votes": 1115, "Revenue (Millions)": "",
               "Runtime (Minutes)": 108, "Metascore": 72}),
        json!({"Rank": 7, "title": "Undated", "year": "unknown",
               "genre": "Drama", "Revenue (Millions)": null}),
    ]
}

async fn seeded() -> (Database, TempDir) {
    let (db, dir) = create_test_db().await;
    db.import_documents(&dataset(), false)
        .await
        .expect("Import should succeed");
    (db, dir)
}

fn memory() -> MemorySource {
    let films = dataset()
        .into_iter()
        .map(|v| Film::from_value(v).unwrap())
        .collect();
    MemorySource::new(films)
}

#[tokio::test]
async fn test_import_counts_and_round_trips_documents() {
    let (db, _dir) = seeded().await;
    assert_eq!(db.count_films().await.unwrap(), 7);

    let films = db.films().await.unwrap();
    assert_eq!(films[0].title_text(), "Guardians of the Galaxy");
    assert_eq!(films[0].extra.get("Rank"), Some(&json!(1)));
    // Collection order is preserved
    assert_eq!(films[6].title_text(), "Undated");
}

#[tokio::test]
async fn test_import_replace_clears_collection() {
    let (db, _dir) = seeded().await;
    let docs = parse_documents(r#"[{"title": "Up", "year": 2009}]"#).unwrap();
    db.import_documents(&docs, true).await.unwrap();
    assert_eq!(db.count_films().await.unwrap(), 1);
}

#[tokio::test]
async fn test_import_rejects_non_objects_atomically() {
    let (db, _dir) = create_test_db().await;
    let docs = vec![json!({"title": "Up"}), json!("not a film")];
    let err = db.import_documents(&docs, false).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(db.count_films().await.unwrap(), 0);
}

#[tokio::test]
async fn test_count_after_1999_ignores_text_years() {
    let (db, _dir) = seeded().await;
    assert_eq!(db.count_released_after(1999).await.unwrap(), 6);
    assert_eq!(db.count_released_after(2010).await.unwrap(), 3);
}

#[tokio::test]
async fn test_runtime_revenue_pairs_numeric_only() {
    let (db, _dir) = seeded().await;
    let pairs = db.runtime_revenue_pairs().await.unwrap();
    // Juno (text revenue), Hounds of Love (empty) and Undated are excluded
    let expected = [(121.0, 333.13), (124.0, 126.46), (152.0, 533.32), (122.0, 74.27)];
    assert_eq!(pairs.len(), expected.len());
    for ((rt, rev), (want_rt, want_rev)) in pairs.iter().zip(expected) {
        assert_eq!(*rt, want_rt);
        assert!((rev - want_rev).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_every_report_matches_memory_source() {
    let (db, _dir) = seeded().await;
    let mem = memory();
    let sql_engine = ReportEngine::new(&db);
    let mem_engine = ReportEngine::new(&mem);

    for kind in ReportKind::ALL {
        if kind == ReportKind::RuntimeRevenueCorrelation {
            continue;
        }
        let from_db = sql_engine.run(kind).await.expect("SQLite report should succeed");
        let from_mem = mem_engine.run(kind).await.expect("Memory report should succeed");
        assert_eq!(from_db, from_mem, "report {} differs between sources", kind);
    }

    // SQLite parses the stored numbers itself, so compare with a tolerance
    let r_db = sql_engine.runtime_revenue_correlation().await.unwrap().unwrap();
    let r_mem = mem_engine.runtime_revenue_correlation().await.unwrap().unwrap();
    assert!((r_db - r_mem).abs() < 1e-9);
}

#[tokio::test]
async fn test_report_values_on_sample() {
    let (db, _dir) = seeded().await;
    let engine = ReportEngine::new(&db);

    assert_eq!(
        engine.most_prolific_year().await.unwrap(),
        YearCount { year: Some(2007), count: 2 }
    );
    assert_eq!(engine.average_votes_2007().await.unwrap(), Some(542818.0));

    let top = engine.top_revenue_film().await.unwrap().unwrap();
    assert_eq!(top.title, "The Dark Knight");

    let per_year = engine.films_per_year().await.unwrap();
    assert_eq!(per_year[0], YearCount { year: None, count: 1 });
    assert_eq!(per_year.iter().map(|r| r.count).sum::<i64>(), 7);

    let decades = engine.top_films_per_decade().await.unwrap();
    let d2000: Vec<_> = decades[0].top_films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(decades[0].decade, 2000);
    assert_eq!(d2000, vec!["No Country for Old Men", "The Dark Knight", "Juno"]);

    let r = engine.runtime_revenue_correlation().await.unwrap().unwrap();
    assert!((-1.0..=1.0).contains(&r));
}

#[tokio::test]
async fn test_create_view_twice_and_query() {
    let (db, _dir) = seeded().await;
    let def = ViewDefinition::high_metascore_and_revenue();

    assert_eq!(db.create_view(&def).await.unwrap(), ViewOutcome::Created);
    let before: Vec<_> = db
        .view_films(&def.name)
        .await
        .unwrap()
        .iter()
        .map(|f| f.title_text())
        .collect();

    assert_eq!(db.create_view(&def).await.unwrap(), ViewOutcome::AlreadyExists);
    let after: Vec<_> = db
        .view_films(&def.name)
        .await
        .unwrap()
        .iter()
        .map(|f| f.title_text())
        .collect();

    // Juno's Metascore is text, so only numeric values qualify
    assert_eq!(before, vec!["The Dark Knight", "No Country for Old Men"]);
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_view_reflects_later_imports() {
    let (db, _dir) = seeded().await;
    let def = ViewDefinition::high_metascore_and_revenue();
    db.create_view(&def).await.unwrap();

    let docs = parse_documents(
        r#"{"title": "Inside Out", "year": 2015, "Metascore": 94, "Revenue (Millions)": 356.45}"#,
    )
    .unwrap();
    db.import_documents(&docs, false).await.unwrap();

    assert_eq!(db.view_films(&def.name).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_view_errors() {
    let (db, _dir) = seeded().await;
    assert!(matches!(
        db.view_films("missing_view").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        db.view_films("films; DROP TABLE films").await,
        Err(Error::Validation(_))
    ));

    let mut clash = ViewDefinition::high_metascore_and_revenue();
    clash.name = "films".to_string();
    assert!(matches!(db.create_view(&clash).await, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_empty_database_reports() {
    let (db, _dir) = create_test_db().await;
    let engine = ReportEngine::new(&db);

    assert_eq!(
        engine.most_prolific_year().await.unwrap(),
        YearCount { year: None, count: 0 }
    );
    assert_eq!(engine.count_after_1999().await.unwrap(), 0);
    assert_eq!(engine.average_votes_2007().await.unwrap(), None);
    assert_eq!(engine.top_revenue_film().await.unwrap(), None);
    assert_eq!(engine.top_genre_by_average_revenue().await.unwrap(), None);
    assert!(engine.distinct_genres().await.unwrap().is_empty());
    assert_eq!(engine.runtime_revenue_correlation().await.unwrap(), None);
}

#[tokio::test]
async fn test_real_valued_years_count_as_years() {
    let (db, _dir) = create_test_db().await;
    let film = |title: &str, year: f64, votes: i64| Film {
        title: Some(FieldValue::from(title)),
        year: Some(FieldValue::Real(year)),
        votes: Some(FieldValue::Integer(votes)),
        runtime_minutes: Some(FieldValue::Integer(120)),
        metascore: Some(FieldValue::Integer(70)),
        ..Film::default()
    };
    let films = vec![
        film("Atonement", 2007.0, 100),
        film("Once", 2007.0, 300),
        film("Halfway", 2007.5, 999),
    ];
    assert_eq!(db.insert_films(&films).await.unwrap(), 3);

    // Stored as JSON reals, not integers
    assert_eq!(db.films().await.unwrap()[0].year, Some(FieldValue::Real(2007.0)));

    let engine = ReportEngine::new(&db);
    assert_eq!(engine.count_after_1999().await.unwrap(), 2);
    assert_eq!(
        engine.most_prolific_year().await.unwrap(),
        YearCount { year: Some(2007), count: 2 }
    );
    assert_eq!(engine.average_votes_2007().await.unwrap(), Some(200.0));

    let runtimes = engine.average_runtime_per_decade().await.unwrap();
    assert_eq!(runtimes.len(), 1);
    assert_eq!(runtimes[0].decade, 2000);
    assert_eq!(runtimes[0].avg_runtime, 120.0);

    let top = engine.top_films_per_decade().await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].decade, 2000);

    // The database count agrees with the in-memory view of the same films
    let mem = MemorySource::new(films);
    assert_eq!(mem.count_released_after(1999).await.unwrap(), 2);
}

//! In-process report aggregations
//!
//! Each function is a pure transformation of a film slice. Values that fail
//! numeric coercion are excluded, never reported as errors. Ordered maps keep
//! grouping deterministic, and ties on the ranking value always resolve to
//! the first film in collection order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::types::{
    DecadeRuntime, DecadeTopFilms, DirectorCount, GenreLongestFilm, GenreRevenue, RatedFilm,
    TopRevenueFilm, YearCount,
};
use crate::models::{decade, Film};

/// Directors need strictly more films than this
pub const PROLIFIC_DIRECTOR_THRESHOLD: i64 = 5;

/// Films kept per decade in the Metascore ranking
pub const TOP_FILMS_PER_DECADE: usize = 3;

/// Year with the most releases. Ties go to the earliest year.
///
/// Films without a whole-number year do not compete; with no dated film the
/// result is `(None, 0)`.
pub fn most_prolific_year(films: &[Film]) -> YearCount {
    let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
    for year in films.iter().filter_map(Film::year) {
        *counts.entry(year).or_insert(0) += 1;
    }

    let mut best = YearCount { year: None, count: 0 };
    for (year, count) in counts {
        if count > best.count {
            best = YearCount {
                year: Some(year),
                count,
            };
        }
    }
    best
}

/// Mean of numeric `Votes` among films released in `year`
pub fn average_votes_for_year(films: &[Film], year: i64) -> Option<f64> {
    mean(
        films
            .iter()
            .filter(|f| f.year() == Some(year))
            .filter_map(Film::votes_number),
    )
}

/// Films per year, ascending. Undated films form a leading `None` bucket so
/// the counts always sum to the collection size.
pub fn films_per_year(films: &[Film]) -> Vec<YearCount> {
    let mut counts: BTreeMap<Option<i64>, i64> = BTreeMap::new();
    for film in films {
        *counts.entry(film.year()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Every genre name appearing in the collection, sorted
pub fn distinct_genres(films: &[Film]) -> Vec<String> {
    films
        .iter()
        .flat_map(Film::genres)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Film with the highest coercible revenue
pub fn top_revenue_film(films: &[Film]) -> Option<TopRevenueFilm> {
    let mut best: Option<(&Film, f64)> = None;
    for film in films {
        let Some(revenue) = film.revenue_double() else {
            continue;
        };
        if best.map_or(true, |(_, top)| revenue > top) {
            best = Some((film, revenue));
        }
    }

    let (film, numeric_revenue) = best?;
    Some(TopRevenueFilm {
        title: film.title_text(),
        original_revenue: film.revenue_millions.clone()?,
        numeric_revenue,
    })
}

/// Directors with more than [`PROLIFIC_DIRECTOR_THRESHOLD`] films, most films
/// first and alphabetical among equals
pub fn prolific_directors(films: &[Film]) -> Vec<DirectorCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for director in films.iter().filter_map(Film::director_name) {
        *counts.entry(director).or_insert(0) += 1;
    }

    let mut rows: Vec<DirectorCount> = counts
        .into_iter()
        .filter(|(_, count)| *count > PROLIFIC_DIRECTOR_THRESHOLD)
        .map(|(director, count)| DirectorCount { director, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.director.cmp(&b.director)));
    rows
}

/// Genre whose films average the highest numeric revenue
///
/// A film contributes once per genre instance. Genres without any numeric
/// revenue have no average and are skipped.
pub fn top_genre_by_average_revenue(films: &[Film]) -> Option<GenreRevenue> {
    let mut sums: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for film in films {
        let revenue = film.revenue_number();
        for genre in film.genres() {
            let entry = sums.entry(genre).or_insert((0.0, 0));
            if let Some(r) = revenue {
                entry.0 += r;
                entry.1 += 1;
            }
        }
    }

    let mut best: Option<GenreRevenue> = None;
    for (genre, (sum, n)) in sums {
        if n == 0 {
            continue;
        }
        let avg_revenue = sum / n as f64;
        if best.as_ref().map_or(true, |b| avg_revenue > b.avg_revenue) {
            best = Some(GenreRevenue { genre, avg_revenue });
        }
    }
    best
}

/// Up to three best-rated films per decade by coerced Metascore
pub fn top_films_per_decade(films: &[Film]) -> Vec<DecadeTopFilms> {
    let mut rated: Vec<RatedFilm> = films
        .iter()
        .filter_map(|f| {
            Some(RatedFilm {
                metascore: f.metascore_double()?,
                year: f.year()?,
                title: f.title_text(),
            })
        })
        .collect();
    // Stable: equal scores keep collection order
    rated.sort_by(|a, b| b.metascore.total_cmp(&a.metascore));

    let mut by_decade: BTreeMap<i64, Vec<RatedFilm>> = BTreeMap::new();
    for film in rated {
        let top = by_decade.entry(decade(film.year)).or_default();
        if top.len() < TOP_FILMS_PER_DECADE {
            top.push(film);
        }
    }

    by_decade
        .into_iter()
        .map(|(decade, top_films)| DecadeTopFilms { decade, top_films })
        .collect()
}

/// Longest film of every genre, longest genres first
pub fn longest_film_per_genre(films: &[Film]) -> Vec<GenreLongestFilm> {
    let mut longest: BTreeMap<String, (f64, &Film)> = BTreeMap::new();
    for film in films {
        let Some(runtime) = film.runtime_double() else {
            continue;
        };
        for genre in film.genres() {
            match longest.get(&genre) {
                Some((max, _)) if *max >= runtime => {}
                _ => {
                    longest.insert(genre, (runtime, film));
                }
            }
        }
    }

    let mut rows: Vec<GenreLongestFilm> = longest
        .into_iter()
        .map(|(genre, (max_runtime, film))| GenreLongestFilm {
            genre,
            max_runtime,
            longest_film: film.clone(),
        })
        .collect();
    // Stable over the alphabetical map order
    rows.sort_by(|a, b| b.max_runtime.total_cmp(&a.max_runtime));
    rows
}

/// Mean coerced runtime per decade, ascending
pub fn average_runtime_per_decade(films: &[Film]) -> Vec<DecadeRuntime> {
    let mut sums: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
    for film in films {
        let (Some(runtime), Some(year)) = (film.runtime_double(), film.year()) else {
            continue;
        };
        let entry = sums.entry(decade(year)).or_insert((0.0, 0));
        entry.0 += runtime;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(decade, (sum, n))| DecadeRuntime {
            decade,
            avg_runtime: sum / n as f64,
        })
        .collect()
}

/// Pearson correlation coefficient of the pairs.
///
/// `None` with fewer than two pairs or when either column is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0u64), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

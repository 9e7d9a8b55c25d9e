//! Data models for the cinestat report engine
//!
//! Film documents are loosely typed: any attribute may be missing, and the
//! numeric-looking ones sometimes arrive as text. Fields are therefore kept
//! as [`FieldValue`] and read through explicit coercions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A single attribute value as stored in a film document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Other(Value), // booleans, arrays, objects
}

impl FieldValue {
    /// Numeric-typed view: only values stored as numbers.
    ///
    /// This is what numeric averages and "is a number" filters see; text is
    /// never parsed here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Conversion to a double with "absent" as the fallback.
    ///
    /// Numbers pass through and text is parsed as-is, so padded strings are
    /// rejected. Anything that does not yield a finite value is `None`.
    pub fn to_double(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(_) | FieldValue::Real(_) => self.as_number(),
            FieldValue::Text(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()),
            FieldValue::Other(_) => None,
        }
    }

    /// Whole numbers are years, whether stored as integers or as reals
    /// like `2007.0`. Fractional reals and text are not.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Real(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render any value as a display string.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Real(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Other(v) => v.to_string(),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Film document
///
/// Named attributes keep their original document keys. Everything else
/// (rank, actors, description...) is preserved in `extra` so a full record
/// can be handed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<FieldValue>,
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<FieldValue>,
    #[serde(rename = "Votes", default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<FieldValue>,
    #[serde(rename = "Revenue (Millions)", default, skip_serializing_if = "Option::is_none")]
    pub revenue_millions: Option<FieldValue>,
    #[serde(rename = "Runtime (Minutes)", default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<FieldValue>,
    #[serde(rename = "Metascore", default, skip_serializing_if = "Option::is_none")]
    pub metascore: Option<FieldValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Film {
    /// Parse a film from a JSON document. The document must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::validation(format!(
                "Film document must be a JSON object, got: {}",
                value
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn title_text(&self) -> String {
        self.title.as_ref().map(FieldValue::display).unwrap_or_default()
    }

    pub fn year(&self) -> Option<i64> {
        self.year.as_ref().and_then(FieldValue::as_year)
    }

    pub fn director_name(&self) -> Option<String> {
        self.director
            .as_ref()
            .map(FieldValue::display)
            .filter(|name| !name.trim().is_empty())
    }

    /// Split the comma-separated genre string into trimmed, non-empty names.
    ///
    /// One entry per genre instance in the record, in stored order.
    pub fn genres(&self) -> Vec<String> {
        self.genre
            .as_ref()
            .and_then(FieldValue::as_text)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn votes_number(&self) -> Option<f64> {
        self.votes.as_ref().and_then(FieldValue::as_number)
    }

    pub fn revenue_number(&self) -> Option<f64> {
        self.revenue_millions.as_ref().and_then(FieldValue::as_number)
    }

    pub fn revenue_double(&self) -> Option<f64> {
        self.revenue_millions.as_ref().and_then(FieldValue::to_double)
    }

    pub fn runtime_number(&self) -> Option<f64> {
        self.runtime_minutes.as_ref().and_then(FieldValue::as_number)
    }

    pub fn runtime_double(&self) -> Option<f64> {
        self.runtime_minutes.as_ref().and_then(FieldValue::to_double)
    }

    pub fn metascore_number(&self) -> Option<f64> {
        self.metascore.as_ref().and_then(FieldValue::as_number)
    }

    pub fn metascore_double(&self) -> Option<f64> {
        self.metascore.as_ref().and_then(FieldValue::to_double)
    }
}

/// Decade of a year: `year - year % 10` (1995 -> 1990).
pub fn decade(year: i64) -> i64 {
    year - year % 10
}

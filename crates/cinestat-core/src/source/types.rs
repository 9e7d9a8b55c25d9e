//! Data source types
//!
//! View definitions and the outcome of defining one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Film;

/// Name of the view created by the "create view" report
pub const HIGH_METASCORE_AND_REVENUE_VIEW: &str = "high_metascore_and_revenue_view";

/// Name of the base film collection
pub const FILMS_COLLECTION: &str = "films";

/// A named filter over the film collection
///
/// A film is visible through the view when both its Metascore and its
/// revenue are stored as numbers and are strictly above the thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,
    pub view_on: String,
    pub metascore_above: f64,
    pub revenue_above: f64,
}

impl ViewDefinition {
    /// Films with Metascore > 80 that made more than 50 million
    pub fn high_metascore_and_revenue() -> Self {
        Self {
            name: HIGH_METASCORE_AND_REVENUE_VIEW.to_string(),
            view_on: FILMS_COLLECTION.to_string(),
            metascore_above: 80.0,
            revenue_above: 50.0,
        }
    }

    /// Check names and thresholds before handing the definition to a store
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(Error::validation(format!("Invalid view name: {}", self.name)));
        }
        if !is_identifier(&self.view_on) {
            return Err(Error::validation(format!(
                "Invalid source collection name: {}",
                self.view_on
            )));
        }
        if !self.metascore_above.is_finite() || !self.revenue_above.is_finite() {
            return Err(Error::validation("View thresholds must be finite numbers"));
        }
        Ok(())
    }

    pub fn matches(&self, film: &Film) -> bool {
        let metascore_ok = film
            .metascore_number()
            .is_some_and(|m| m > self.metascore_above);
        let revenue_ok = film
            .revenue_number()
            .is_some_and(|r| r > self.revenue_above);
        metascore_ok && revenue_ok
    }
}

/// Result of a view definition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOutcome {
    Created,
    AlreadyExists,
}

impl ViewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewOutcome::Created => "created",
            ViewOutcome::AlreadyExists => "already_exists",
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn film(metascore: Option<FieldValue>, revenue: Option<FieldValue>) -> Film {
        Film {
            metascore,
            revenue_millions: revenue,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_definition() {
        let def = ViewDefinition::high_metascore_and_revenue();
        assert_eq!(def.name, "high_metascore_and_revenue_view");
        assert_eq!(def.view_on, "films");
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_matches_requires_both_thresholds() {
        let def = ViewDefinition::high_metascore_and_revenue();
        assert!(def.matches(&film(Some(FieldValue::Integer(81)), Some(FieldValue::Real(50.5)))));
        assert!(!def.matches(&film(Some(FieldValue::Integer(80)), Some(FieldValue::Real(300.0)))));
        assert!(!def.matches(&film(Some(FieldValue::Integer(95)), Some(FieldValue::Real(50.0)))));
        assert!(!def.matches(&film(Some(FieldValue::Integer(95)), None)));
    }

    #[test]
    fn test_matches_ignores_text_values() {
        let def = ViewDefinition::high_metascore_and_revenue();
        assert!(!def.matches(&film(Some(FieldValue::from("95")), Some(FieldValue::Real(120.0)))));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("films"));
        assert!(is_identifier("_v2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2films"));
        assert!(!is_identifier("films; DROP TABLE films"));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut def = ViewDefinition::high_metascore_and_revenue();
        def.name = "bad name".to_string();
        assert!(matches!(def.validate(), Err(Error::Validation(_))));

        let mut def = ViewDefinition::high_metascore_and_revenue();
        def.revenue_above = f64::NAN;
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(ViewOutcome::Created.as_str(), "created");
        assert_eq!(ViewOutcome::AlreadyExists.as_str(), "already_exists");
    }
}

//! User preferences
//!
//! Stored values come back as untrusted JSON. Each field is checked on its
//! own so a bad field never discards the good ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::consts::MAX_FIRST_UNIT_ROD;
use crate::layout::LayoutSize;

/// Why stored settings could not be applied at all
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Show the digit readout above the frame
    pub show_digits: bool,
    /// Place of the first rod marked as a unit rod
    pub first_unit_rod: usize,
    pub size: LayoutSize,
    /// Bead style for ordinary beads
    pub main_style: usize,
    /// Style override for header beads on unit rods
    pub top_unit_style: Option<usize>,
    /// Style override for all beads on unit rods
    pub rod_unit_style: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_digits: false,
            first_unit_rod: 3,
            size: LayoutSize::Medium,
            main_style: 0,
            top_unit_style: None,
            rod_unit_style: None,
        }
    }
}

impl Settings {
    /// Parse stored settings on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.merge_json(json)?;
        Ok(settings)
    }

    /// Apply every well-typed field of a stored JSON object
    ///
    /// Returns the number of fields applied. Mistyped fields are skipped.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, SettingsError> {
        let value: Value = serde_json::from_str(json)?;
        let kind = json_kind(&value);
        let Value::Object(fields) = value else {
            return Err(SettingsError::NotAnObject(kind));
        };

        let mut applied = 0;
        for (key, field) in &fields {
            // Unset optional styles are stored as null
            if field.is_null() {
                continue;
            }
            let ok = match key.as_str() {
                "showDigits" => field.as_bool().map(|v| self.show_digits = v).is_some(),
                "firstUnitRod" => field
                    .as_f64()
                    .map(|v| self.first_unit_rod = wrap_first_unit_rod(v))
                    .is_some(),
                "size" => field
                    .as_str()
                    .and_then(LayoutSize::from_str)
                    .map(|v| self.size = v)
                    .is_some(),
                "mainStyle" => field.as_f64().map(|v| self.main_style = non_negative(v)).is_some(),
                "rodUnitStyle" => field
                    .as_f64()
                    .map(|v| self.rod_unit_style = Some(non_negative(v)))
                    .is_some(),
                "topUnitStyle" => field
                    .as_f64()
                    .map(|v| self.top_unit_style = Some(non_negative(v)))
                    .is_some(),
                _ => continue,
            };
            if ok {
                applied += 1;
            } else {
                log::warn!("Ignoring stored setting {key}: unexpected value {field}");
            }
        }
        Ok(applied)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Whether a rod carries the unit marker (every third rod)
    ///
    /// Rods to the right of the first unit rod are never marked.
    pub fn is_unit_rod(&self, place: usize) -> bool {
        place + 2 >= self.first_unit_rod && (place + 2 - self.first_unit_rod) % 3 == 1
    }

    /// Style for a bead, most specific override first
    pub fn bead_style(&self, place: usize, header: bool) -> usize {
        let unit = self.is_unit_rod(place);
        let top = if unit && header { self.top_unit_style } else { None };
        let rod = if unit { self.rod_unit_style } else { None };
        top.or(rod).unwrap_or(self.main_style)
    }
}

fn wrap_first_unit_rod(v: f64) -> usize {
    non_negative(v % MAX_FIRST_UNIT_ROD as f64)
}

fn non_negative(v: f64) -> usize {
    if v.is_finite() && v > 0.0 { v as usize } else { 0 }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(!s.show_digits);
        assert_eq!(s.first_unit_rod, 3);
        assert_eq!(s.size, LayoutSize::Medium);
    }

    #[test]
    fn test_merge_valid_fields() {
        let s = Settings::from_json(
            r#"{"showDigits": true, "firstUnitRod": 2, "size": "big", "mainStyle": 4, "rodUnitStyle": 1}"#,
        )
        .unwrap();
        assert!(s.show_digits);
        assert_eq!(s.first_unit_rod, 2);
        assert_eq!(s.size, LayoutSize::Big);
        assert_eq!(s.main_style, 4);
        assert_eq!(s.rod_unit_style, Some(1));
        assert_eq!(s.top_unit_style, None);
    }

    #[test]
    fn test_mistyped_fields_skipped() {
        let mut s = Settings::default();
        let applied = s
            .merge_json(r#"{"showDigits": "yes", "size": "huge", "mainStyle": 2, "extra": 1}"#)
            .unwrap();
        assert_eq!(applied, 1);
        assert!(!s.show_digits);
        assert_eq!(s.size, LayoutSize::Medium);
        assert_eq!(s.main_style, 2);
    }

    #[test]
    fn test_numbers_are_clamped() {
        let s = Settings::from_json(r#"{"firstUnitRod": 9, "mainStyle": -3, "topUnitStyle": -1}"#).unwrap();
        assert_eq!(s.first_unit_rod, 1);
        assert_eq!(s.main_style, 0);
        assert_eq!(s.top_unit_style, Some(0));
        let s = Settings::from_json(r#"{"firstUnitRod": -5}"#).unwrap();
        assert_eq!(s.first_unit_rod, 0);
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(Settings::from_json("{oops"), Err(SettingsError::Json(_))));
        assert!(matches!(
            Settings::from_json("[1, 2]"),
            Err(SettingsError::NotAnObject("an array"))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            show_digits: true,
            size: LayoutSize::Small,
            top_unit_style: Some(5),
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&s.to_json()).unwrap(), s);
    }

    #[test]
    fn test_unit_rods() {
        let s = Settings::default();
        let units: Vec<usize> = (0..10).filter(|&p| s.is_unit_rod(p)).collect();
        assert_eq!(units, vec![2, 5, 8]);
        let s = Settings {
            first_unit_rod: 4,
            ..Default::default()
        };
        let units: Vec<usize> = (0..10).filter(|&p| s.is_unit_rod(p)).collect();
        assert_eq!(units, vec![3, 6, 9]);
        let s = Settings {
            first_unit_rod: 0,
            ..Default::default()
        };
        let units: Vec<usize> = (0..10).filter(|&p| s.is_unit_rod(p)).collect();
        assert_eq!(units, vec![1, 4, 7]);
    }

    #[test]
    fn test_bead_style_precedence() {
        let s = Settings {
            main_style: 1,
            rod_unit_style: Some(2),
            top_unit_style: Some(3),
            ..Default::default()
        };
        assert_eq!(s.bead_style(0, true), 1);
        assert_eq!(s.bead_style(2, false), 2);
        assert_eq!(s.bead_style(2, true), 3);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Editable profile fields, in form order
pub const PROFILE_FIELDS: [&str; 4] = ["name", "age", "weight", "height"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Kilograms
    pub weight: f64,
    /// Centimetres
    pub height: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            age: 25,
            weight: 70.0,
            height: 175.0,
        }
    }
}

impl UserProfile {
    pub fn initials(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }

    /// One-line summary shown under the name
    pub fn summary(&self) -> String {
        format!("{} y • {}kg", self.age, self.weight)
    }

    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "age" => Some(self.age.to_string()),
            "weight" => Some(self.weight.to_string()),
            "height" => Some(self.height.to_string()),
            _ => None,
        }
    }

    /// Parse and store one field; on error the profile is unchanged.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<()> {
        let value = raw.trim();
        match field {
            "name" => self.name = value.to_string(),
            "age" => self.age = value.parse().map_err(|_| invalid("age", raw))?,
            "weight" => self.weight = positive("weight", raw)?,
            "height" => self.height = positive("height", raw)?,
            _ => return Err(invalid("field", field)),
        }
        Ok(())
    }
}

fn positive(field: &'static str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(field, raw)),
    }
}

fn invalid(field: &'static str, raw: &str) -> FitError {
    FitError::InvalidField {
        field,
        value: raw.to_string(),
    }
}

/// The settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub user: UserProfile,
}

impl Settings {
    /// Apply every `(field, raw)` pair, all or nothing.
    pub fn with_profile_edits<'f, 'v, I>(&self, edits: I) -> Result<Settings>
    where
        I: IntoIterator<Item = (&'f str, &'v str)>,
    {
        let mut next = self.clone();
        for (field, raw) in edits {
            next.user.set_field(field, raw)?;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_settings_document() {
        let settings: Settings = serde_json::from_str(
            r#"{"user": {"name": "alex", "age": 31, "weight": 72.5, "height": 180}}"#,
        )
        .unwrap();
        assert_eq!(settings.user.name, "alex");
        assert_eq!(settings.user.height, 180.0);
        assert_eq!(settings.user.initials(), "A");
        assert_eq!(settings.user.summary(), "31 y • 72.5kg");
    }

    #[test]
    fn empty_name_has_placeholder_initials() {
        let profile = UserProfile {
            name: "  ".into(),
            ..Default::default()
        };
        assert_eq!(profile.initials(), "U");
    }

    #[test]
    fn set_field_validates_numbers() {
        let mut profile = UserProfile::default();
        profile.set_field("age", " 40 ").unwrap();
        profile.set_field("weight", "81.2").unwrap();
        assert_eq!(profile.age, 40);
        assert_eq!(profile.weight, 81.2);

        assert_matches!(
            profile.set_field("age", "forty"),
            Err(FitError::InvalidField { field: "age", .. })
        );
        assert_matches!(
            profile.set_field("height", "-3"),
            Err(FitError::InvalidField { field: "height", .. })
        );
        assert_matches!(profile.set_field("shoe", "42"), Err(FitError::InvalidField { .. }));
        assert_eq!(profile.age, 40);
    }

    #[test]
    fn profile_edits_are_all_or_nothing() {
        let settings = Settings::default();
        let result = settings.with_profile_edits([("name", "Sam"), ("age", "x")]);
        assert!(result.is_err());
        assert_eq!(settings.user.name, "User");

        let updated = settings
            .with_profile_edits([("name", "Sam"), ("age", "29")])
            .unwrap();
        assert_eq!(updated.user.name, "Sam");
        assert_eq!(updated.user.age, 29);
    }

    #[test]
    fn field_values_match_form_order() {
        let profile = UserProfile::default();
        let values: Vec<_> = PROFILE_FIELDS
            .iter()
            .map(|f| profile.field_value(f).unwrap())
            .collect();
        assert_eq!(values, ["User", "25", "70", "175"]);
    }
}

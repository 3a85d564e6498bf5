// recipe.rs

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Accepted cooking times, in minutes.
pub const COOKING_TIME_RANGE: RangeInclusive<u32> = 10..=120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    #[default]
    Vegetarian,
    Vegan,
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietType::Vegetarian => write!(f, "vegetarian"),
            DietType::Vegan => write!(f, "vegan"),
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub diet_type: DietType,
    pub cuisine_preference: String,
    pub cooking_time: String,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            diet_type: DietType::default(),
            cuisine_preference: String::new(),
            cooking_time: "30".to_string(),
        }
    }
}

/// Body of `POST {base}/recipe`. Optional fields are omitted, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub diet_type: DietType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cuisine_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cooking_time: Option<u32>,
}

impl RecipeRequest {
    /// Build the wire payload from form input.
    ///
    /// Cuisine is forwarded verbatim when non-empty. Cooking time is omitted
    /// when blank; otherwise it must be a whole number inside
    /// [`COOKING_TIME_RANGE`].
    pub fn from_preference(pref: &Preference) -> Result<Self, RecipeError> {
        let cuisine_preference =
            (!pref.cuisine_preference.is_empty()).then(|| pref.cuisine_preference.clone());

        let raw_time = pref.cooking_time.trim();
        let cooking_time = if raw_time.is_empty() {
            None
        } else {
            let minutes: u32 = raw_time.parse().map_err(|_| {
                RecipeError::Validation(format!(
                    "cooking time must be a whole number of minutes, got {:?}",
                    pref.cooking_time
                ))
            })?;
            if !COOKING_TIME_RANGE.contains(&minutes) {
                return Err(RecipeError::Validation(format!(
                    "cooking time must be between {} and {} minutes",
                    COOKING_TIME_RANGE.start(),
                    COOKING_TIME_RANGE.end()
                )));
            }
            Some(minutes)
        };

        Ok(Self {
            diet_type: pref.diet_type,
            cuisine_preference,
            cooking_time,
        })
    }
}

/// Recipe returned by the backend. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    /// May span several lines.
    pub instructions: String,
    pub prep_time: String,
    pub diet_type: String,
}

impl Recipe {
    /// Validate a success body against the recipe shape.
    pub fn from_json(body: &[u8]) -> Result<Self, RecipeError> {
        serde_json::from_slice(body).map_err(|e| RecipeError::MalformedResponse(e.to_string()))
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

/// Body of `GET {base}/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

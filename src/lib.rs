//! Client for a diet-aware recipe service: collect preferences, request a
//! recipe, and track the request lifecycle.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod recipe;
pub mod templates;

pub use client::{HttpBackend, RecipeBackend};
pub use config::{BackendConfig, BuildMode};
pub use controller::{Action, Effect, FormState, RecipeController, RequestState, reduce};
pub use error::RecipeError;
pub use recipe::{DietType, Preference, Recipe, RecipeRequest};

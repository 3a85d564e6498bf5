// error.rs
use thiserror::Error;

/// Message shown when the backend rejects a request without a usable `detail`.
pub const FALLBACK_BACKEND_MESSAGE: &str = "Failed to fetch recipe";

/// Message shown when no response could be obtained at all.
pub const TRANSPORT_MESSAGE: &str = "Unable to reach the recipe service";

/// Everything that can end a submission in the `Failed` state.
///
/// Variants carry strings rather than source errors so the value can be
/// cloned into controller state and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("{0}")]
    Validation(String),

    /// The underlying cause is kept for logging; users see the generic text.
    #[error("Unable to reach the recipe service")]
    Transport(String),

    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("recipe service returned a malformed recipe: {0}")]
    MalformedResponse(String),

    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl RecipeError {
    /// True for errors raised before anything was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(self, RecipeError::Validation(_) | RecipeError::Config(_))
    }
}

impl From<reqwest::Error> for RecipeError {
    fn from(e: reqwest::Error) -> Self {
        RecipeError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for RecipeError {
    fn from(e: url::ParseError) -> Self {
        RecipeError::Config(e.to_string())
    }
}

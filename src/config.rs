// config.rs

use std::time::Duration;

use url::Url;

use crate::error::RecipeError;

/// Base used in production when no override is given.
pub const PRODUCTION_API_BASE: &str = "/api";

/// Base used in development when no override is given.
pub const DEV_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuildMode {
    Production,
    Development,
}

impl Default for BuildMode {
    /// Release builds behave like a production deployment.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

/// Where the recipe backend lives.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub backend_url: Option<String>,
    pub mode: BuildMode,
    /// Origin the relative production base is resolved against.
    pub site_origin: Option<String>,
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    /// Pick the base URL: explicit override, else `/api` in production,
    /// else the local development server. Blank overrides count as unset.
    pub fn resolve_base(&self) -> String {
        match self.backend_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => match self.mode {
                BuildMode::Production => PRODUCTION_API_BASE.to_string(),
                BuildMode::Development => DEV_BACKEND_URL.to_string(),
            },
        }
    }

    /// Absolute form of [`resolve_base`](Self::resolve_base), always ending
    /// in `/` so endpoint paths can be joined onto it.
    pub fn endpoint_base(&self) -> Result<Url, RecipeError> {
        let base = self.resolve_base();
        let absolute = match Url::parse(&base) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self.site_origin.as_deref().ok_or_else(|| {
                    RecipeError::Config(format!(
                        "backend base {base:?} is relative and no site origin is configured"
                    ))
                })?;
                Url::parse(origin)?.join(&base)?
            }
            Err(e) => return Err(e.into()),
        };
        with_trailing_slash(absolute)
    }
}

fn with_trailing_slash(mut url: Url) -> Result<Url, RecipeError> {
    if url.cannot_be_a_base() {
        return Err(RecipeError::Config(format!("{url} cannot be used as a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

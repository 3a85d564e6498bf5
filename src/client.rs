// client.rs

use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client};
use url::Url;

use crate::error::{RecipeError, FALLBACK_BACKEND_MESSAGE};
use crate::recipe::{ErrorBody, HealthStatus, Recipe, RecipeRequest};

/// Anything that can turn a request into a recipe.
///
/// `base` is the resolved endpoint base and always ends in `/`.
pub trait RecipeBackend {
    fn fetch_recipe(
        &self,
        base: &Url,
        request: &RecipeRequest,
    ) -> impl Future<Output = Result<Recipe, RecipeError>> + Send;
}

/// reqwest implementation of the recipe service contract.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
}

impl HttpBackend {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self, RecipeError> {
        let mut builder = Client::builder().user_agent(concat!("diet-recipe/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RecipeError::Config(format!("could not build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// `GET {base}/health`
    pub async fn health(&self, base: &Url) -> Result<HealthStatus, RecipeError> {
        let url = base.join("health")?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &body));
        }
        serde_json::from_slice(&body).map_err(|e| RecipeError::MalformedResponse(e.to_string()))
    }
}

impl RecipeBackend for HttpBackend {
    async fn fetch_recipe(&self, base: &Url, request: &RecipeRequest) -> Result<Recipe, RecipeError> {
        let url = base.join("recipe")?;
        tracing::debug!(%url, ?request, "posting recipe request");

        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .inspect_err(|e| log::warn!("recipe request failed before a response: {}", e))?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = backend_error(status.as_u16(), &body);
            log::warn!("recipe service answered {}: {}", status, err);
            return Err(err);
        }

        Recipe::from_json(&body).inspect_err(|e| log::warn!("{}", e))
    }
}

/// Map a non-2xx body to an error, preferring its `detail` field.
fn backend_error(status: u16, body: &[u8]) -> RecipeError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| FALLBACK_BACKEND_MESSAGE.to_string());
    RecipeError::Backend { status, detail }
}

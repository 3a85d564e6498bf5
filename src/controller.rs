// controller.rs
//
// Form state and request lifecycle. All changes go through `reduce`, which is
// pure; `RecipeController` only holds the current record and runs the effects
// the reducer asks for.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::RecipeBackend;
use crate::config::BackendConfig;
use crate::error::RecipeError;
use crate::recipe::{DietType, Preference, Recipe, RecipeRequest};

/// Request lifecycle. A recipe and an error can never be held together, and
/// both are gone while a request is loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading { seq: u64 },
    Succeeded(Recipe),
    Failed(RecipeError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            RequestState::Succeeded(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RecipeError> {
        match self {
            RequestState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Everything the form owns. Replaced wholesale on every action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub preference: Preference,
    pub request: RequestState,
    /// Sequence number of the most recent submission; 0 before the first.
    pub latest_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetDietType(DietType),
    SetCuisine(String),
    SetCookingTime(String),
    Submit,
    Resolve {
        seq: u64,
        outcome: Result<Recipe, RecipeError>,
    },
}

/// Work the reducer wants done outside of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { seq: u64, request: RecipeRequest },
}

/// The single transition function for [`FormState`].
pub fn reduce(state: &FormState, action: Action) -> (FormState, Option<Effect>) {
    let mut next = state.clone();
    match action {
        Action::SetDietType(diet_type) => next.preference.diet_type = diet_type,
        Action::SetCuisine(cuisine) => next.preference.cuisine_preference = cuisine,
        Action::SetCookingTime(time) => next.preference.cooking_time = time,
        Action::Submit => match RecipeRequest::from_preference(&state.preference) {
            Ok(request) => {
                let seq = state.latest_seq + 1;
                next.latest_seq = seq;
                next.request = RequestState::Loading { seq };
                return (next, Some(Effect::Fetch { seq, request }));
            }
            Err(err) => {
                // Still bump the sequence so an outstanding fetch cannot
                // overwrite the validation error.
                next.latest_seq = state.latest_seq + 1;
                next.request = RequestState::Failed(err);
            }
        },
        Action::Resolve { seq, outcome } => {
            if seq != state.latest_seq || !state.request.is_loading() {
                debug!(seq, latest = state.latest_seq, "dropping stale resolution");
                return (next, None);
            }
            next.request = match outcome {
                Ok(recipe) => RequestState::Succeeded(recipe),
                Err(err) => RequestState::Failed(err),
            };
        }
    }
    (next, None)
}

/// Owns one [`FormState`] and talks to the backend on its behalf.
pub struct RecipeController<B> {
    backend: B,
    config: BackendConfig,
    state: Arc<RwLock<FormState>>,
}

impl<B: RecipeBackend> RecipeController<B> {
    pub fn new(backend: B, config: BackendConfig) -> Self {
        Self {
            backend,
            config,
            state: Arc::new(RwLock::new(FormState::default())),
        }
    }

    pub async fn snapshot(&self) -> FormState {
        self.state.read().await.clone()
    }

    /// Apply one action and return whatever effect it produced.
    pub async fn dispatch(&self, action: Action) -> Option<Effect> {
        let mut state = self.state.write().await;
        let (next, effect) = reduce(&state, action);
        if next.request != state.request {
            debug!(from = ?state.request, to = ?next.request, "request state changed");
        }
        *state = next;
        effect
    }

    pub async fn set_diet_type(&self, diet_type: DietType) {
        self.dispatch(Action::SetDietType(diet_type)).await;
    }

    pub async fn set_cuisine(&self, cuisine: impl Into<String>) {
        self.dispatch(Action::SetCuisine(cuisine.into())).await;
    }

    pub async fn set_cooking_time(&self, cooking_time: impl Into<String>) {
        self.dispatch(Action::SetCookingTime(cooking_time.into())).await;
    }

    /// Submit the current preferences and wait for the outcome.
    ///
    /// Returns the request state after this submission settles. If a newer
    /// submission started in the meantime, its state is what comes back.
    pub async fn submit(&self) -> RequestState {
        if let Some(effect) = self.dispatch(Action::Submit).await {
            self.run(effect).await;
        }
        self.state.read().await.request.clone()
    }

    async fn run(&self, effect: Effect) {
        let Effect::Fetch { seq, request } = effect;
        info!(seq, diet_type = %request.diet_type, "submitting recipe request");

        // Resolved per submission so configuration changes apply immediately.
        let outcome = match self.config.endpoint_base() {
            Ok(base) => self.backend.fetch_recipe(&base, &request).await,
            Err(err) => Err(err),
        };
        match &outcome {
            Ok(recipe) => info!(seq, recipe = %recipe.recipe_name, "recipe received"),
            Err(err) => info!(seq, error = %err, "recipe request failed"),
        }
        self.dispatch(Action::Resolve { seq, outcome }).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            recipe_name: name.to_string(),
            ingredients: vec!["tofu".to_string(), "soy sauce".to_string()],
            instructions: "Press.\nFry.".to_string(),
            prep_time: "20 minutes".to_string(),
            diet_type: "vegan".to_string(),
        }
    }

    fn assert_exclusive(state: &FormState) {
        let r = &state.request;
        let shown = [r.is_loading(), r.recipe().is_some(), r.error().is_some()];
        assert!(shown.iter().filter(|s| **s).count() <= 1, "{r:?}");
    }

    fn apply(state: FormState, actions: impl IntoIterator<Item = Action>) -> FormState {
        actions.into_iter().fold(state, |s, a| {
            let (next, _) = reduce(&s, a);
            assert_exclusive(&next);
            next
        })
    }

    #[test]
    fn starts_idle_with_defaults() {
        let state = FormState::default();
        assert_eq!(state.request, RequestState::Idle);
        assert_eq!(state.preference.diet_type, DietType::Vegetarian);
        assert_eq!(state.preference.cooking_time, "30");
    }

    #[test]
    fn submit_enters_loading_and_emits_fetch() {
        let state = apply(
            FormState::default(),
            [Action::SetDietType(DietType::Vegan), Action::SetCuisine("Thai".into())],
        );
        let (next, effect) = reduce(&state, Action::Submit);
        assert_eq!(next.request, RequestState::Loading { seq: 1 });
        assert_eq!(
            effect,
            Some(Effect::Fetch {
                seq: 1,
                request: RecipeRequest {
                    diet_type: DietType::Vegan,
                    cuisine_preference: Some("Thai".into()),
                    cooking_time: Some(30),
                }
            })
        );
    }

    #[test]
    fn submit_clears_previous_outcome() {
        let done = apply(
            FormState::default(),
            [Action::Submit, Action::Resolve { seq: 1, outcome: Ok(recipe("Pad Thai")) }],
        );
        assert!(done.request.recipe().is_some());

        let (loading, _) = reduce(&done, Action::Submit);
        assert_eq!(loading.request, RequestState::Loading { seq: 2 });

        let failed = apply(
            loading,
            [Action::Resolve {
                seq: 2,
                outcome: Err(RecipeError::Transport("refused".into())),
            }],
        );
        let (loading_again, _) = reduce(&failed, Action::Submit);
        assert!(loading_again.request.error().is_none());
        assert!(loading_again.request.is_loading());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let state = apply(FormState::default(), [Action::Submit, Action::Submit]);
        assert_eq!(state.latest_seq, 2);

        let state = apply(
            state,
            [
                Action::Resolve { seq: 2, outcome: Ok(recipe("second")) },
                Action::Resolve { seq: 1, outcome: Ok(recipe("first")) },
            ],
        );
        assert_eq!(state.request.recipe().unwrap().recipe_name, "second");
    }

    #[test]
    fn resolution_after_settling_is_ignored() {
        let state = apply(
            FormState::default(),
            [
                Action::Submit,
                Action::Resolve { seq: 1, outcome: Ok(recipe("kept")) },
                Action::Resolve {
                    seq: 1,
                    outcome: Err(RecipeError::Transport("late".into())),
                },
            ],
        );
        assert_eq!(state.request.recipe().unwrap().recipe_name, "kept");
    }

    #[test]
    fn invalid_cooking_time_fails_without_fetch() {
        let state = apply(FormState::default(), [Action::SetCookingTime("soon".into())]);
        let (next, effect) = reduce(&state, Action::Submit);
        assert!(effect.is_none());
        assert!(matches!(next.request, RequestState::Failed(RecipeError::Validation(_))));
    }

    #[test]
    fn validation_error_outlives_outstanding_fetch() {
        let state = apply(
            FormState::default(),
            [
                Action::Submit,
                Action::SetCookingTime("500".into()),
                Action::Submit,
                Action::Resolve { seq: 1, outcome: Ok(recipe("late")) },
            ],
        );
        assert!(matches!(state.request, RequestState::Failed(RecipeError::Validation(_))));
    }

    #[test]
    fn editing_fields_keeps_request_state() {
        let state = apply(
            FormState::default(),
            [
                Action::Submit,
                Action::SetCuisine("Mexican".into()),
                Action::SetDietType(DietType::Vegan),
            ],
        );
        assert!(state.request.is_loading());
        assert_eq!(state.preference.cuisine_preference, "Mexican");
    }
}

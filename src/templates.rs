// Bring in Askama templating
use askama::Template;

use crate::controller::RequestState;
use crate::recipe::Recipe;

pub const EMPTY_STATE: &str = "No recipe yet. Choose your preferences and ask for one.";
pub const LOADING: &str = "Generating your recipe...";

// Result panel, rendered from templates/recipe.txt
#[derive(Template)]
#[template(path = "recipe.txt")]
pub struct RecipeTemplate<'a> {
    pub recipe: &'a Recipe,
    pub bullet: &'static str,
}

impl<'a> RecipeTemplate<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self { recipe, bullet: "•" }
    }
}

/// Text for whichever panel the request state calls for.
pub fn render_state(state: &RequestState) -> Result<String, askama::Error> {
    match state {
        RequestState::Idle => Ok(EMPTY_STATE.to_string()),
        RequestState::Loading { .. } => Ok(LOADING.to_string()),
        RequestState::Succeeded(recipe) => RecipeTemplate::new(recipe).render(),
        RequestState::Failed(err) => Ok(format!("Error: {err}")),
    }
}

pub mod actions;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod ranking;
pub mod render;

pub use actions::{copy_recipe, recipe_text, share_recipe, Clipboard, Notifier, ShareSheet};
pub use app::{load_featured, App, FeaturedRecipe, SuggestOutcome};
pub use client::{HttpRecipeApi, RecipeApi};
pub use config::ClientConfig;
pub use error::{ActionError, SuggestError};
pub use ingredients::IngredientSet;
pub use model::{CombinedRecipe, GapInfo, Recipe, RecipeId};
pub use render::{RecipeCard, RenderState, Renderer, SuggestionsView, PAGE_SIZE};

/// Rank the catalog at `base_url` against a comma-separated ingredient list.
///
/// Returns an empty list without touching the network when no ingredient
/// survives normalization.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ranked = flavor_graph::suggest_recipes("http://127.0.0.1:5000", "egg, flour").await?;
/// for combined in ranked {
///     println!("{} ({} missing)", combined.title(), combined.missing.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn suggest_recipes(
    base_url: &str,
    raw_ingredients: &str,
) -> Result<Vec<CombinedRecipe>, SuggestError> {
    let mut ingredients = IngredientSet::new();
    ingredients.add(raw_ingredients);
    if ingredients.is_empty() {
        return Ok(Vec::new());
    }

    let api = HttpRecipeApi::with_base_url(base_url)?;
    app::fetch_and_rank(&api, ingredients.as_slice()).await
}

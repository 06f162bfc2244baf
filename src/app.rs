//! Application state: the ingredient set, the ranked suggestions and their
//! pagination, plus the suggest flow that connects them.
//!
//! A suggest is split in three steps so that overlapping requests can be
//! reasoned about:
//!
//! 1. [`App::prepare_suggest`] validates the ingredient set, shows the loading
//!    placeholder and stamps a new request generation.
//! 2. [`SuggestRequest::run`] performs the network calls without touching state.
//! 3. [`App::apply_suggest`] paints the result, unless a newer request was
//!    started in the meantime. The last request to *start* wins.
//!
//! [`App::suggest`] chains the three for the common case.

use log::{error, info, warn};

use crate::actions::{copy_recipe, share_recipe, Clipboard, Notifier, ShareSheet};
use crate::client::RecipeApi;
use crate::config::ClientConfig;
use crate::error::SuggestError;
use crate::ingredients::{Chip, IngredientSet};
use crate::model::{CombinedRecipe, Recipe, RecipeId};
use crate::ranking::combine_and_rank;
use crate::render::{PaintedPage, Renderer, SentinelId, SuggestionsView, EMPTY_SET_NOTICE};

/// Fetch the catalog, analyze it against `ingredients` in one batch and rank it
pub async fn fetch_and_rank(
    api: &dyn RecipeApi,
    ingredients: &[String],
) -> Result<Vec<CombinedRecipe>, SuggestError> {
    let recipes = api.fetch_recipes().await?;
    let gaps = api.analyze_gaps(&recipes, ingredients).await?;
    Ok(combine_and_rank(recipes, &gaps))
}

/// A recipe highlighted before any search
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedRecipe {
    pub recipe: Recipe,
    /// Tags joined with commas
    pub meta: String,
}

/// The first `count` catalog entries. Any failure yields an empty list.
pub async fn load_featured(api: &dyn RecipeApi, count: usize) -> Vec<FeaturedRecipe> {
    match api.fetch_recipes().await {
        Ok(recipes) => recipes
            .into_iter()
            .take(count)
            .map(|recipe| FeaturedRecipe {
                meta: recipe.tags.join(", "),
                recipe,
            })
            .collect(),
        Err(e) => {
            warn!("Could not load featured recipes: {}", e);
            Vec::new()
        }
    }
}

/// A suggest that has been validated and stamped, ready to run
#[derive(Debug, Clone)]
pub struct SuggestRequest {
    generation: u64,
    ingredients: Vec<String>,
}

impl SuggestRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub async fn run(self, api: &dyn RecipeApi) -> SuggestResponse {
        let result = fetch_and_rank(api, &self.ingredients).await;
        SuggestResponse {
            generation: self.generation,
            result,
        }
    }
}

/// A completed suggest, waiting to be applied
#[derive(Debug)]
pub struct SuggestResponse {
    generation: u64,
    result: Result<Vec<CombinedRecipe>, SuggestError>,
}

impl SuggestResponse {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestOutcome {
    /// The ingredient set was empty; no request was made
    NeedsIngredients,
    /// Page 0 of the new ranking was painted
    Painted(PaintedPage),
    /// The flow aborted; the message is shown inline
    Failed(String),
    /// A newer request started before this one completed
    Superseded,
}

#[derive(Debug)]
pub struct App {
    ingredients: IngredientSet,
    renderer: Renderer,
    generation: u64,
}

impl App {
    pub fn new(page_size: usize) -> Self {
        App {
            ingredients: IngredientSet::new(),
            renderer: Renderer::new(page_size),
            generation: 0,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        App::new(config.page_size)
    }

    pub fn ingredients(&self) -> &IngredientSet {
        &self.ingredients
    }

    pub fn chips(&self) -> Vec<Chip> {
        self.ingredients.chips()
    }

    pub fn add_ingredients(&mut self, raw: &str) -> usize {
        self.ingredients.add(raw)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<String> {
        self.ingredients.remove(index)
    }

    /// Clear the ingredients and the suggestions region.
    ///
    /// Any request still in flight is superseded.
    pub fn reset(&mut self) {
        self.ingredients.reset();
        self.renderer.clear();
        self.generation += 1;
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn view(&self) -> SuggestionsView {
        self.renderer.view()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate and stamp a new suggest. Returns `None` when there is nothing
    /// to search for, after showing a notice.
    pub fn prepare_suggest(&mut self) -> Option<SuggestRequest> {
        if self.ingredients.is_empty() {
            self.renderer.show_notice(EMPTY_SET_NOTICE);
            return None;
        }

        self.generation += 1;
        self.renderer.show_loading();
        Some(SuggestRequest {
            generation: self.generation,
            ingredients: self.ingredients.as_slice().to_vec(),
        })
    }

    pub fn apply_suggest(&mut self, response: SuggestResponse) -> SuggestOutcome {
        if response.generation != self.generation {
            warn!(
                "Discarding suggestions from request {} (latest is {})",
                response.generation, self.generation
            );
            return SuggestOutcome::Superseded;
        }

        match response.result {
            Ok(ranked) => {
                info!("Ranked {} recipes", ranked.len());
                SuggestOutcome::Painted(self.renderer.load(ranked))
            }
            Err(e) => {
                let message = e.to_string();
                error!("Suggest failed: {}", message);
                self.renderer.show_error(message.clone());
                SuggestOutcome::Failed(message)
            }
        }
    }

    pub async fn suggest(&mut self, api: &dyn RecipeApi) -> SuggestOutcome {
        let Some(request) = self.prepare_suggest() else {
            return SuggestOutcome::NeedsIngredients;
        };
        let response = request.run(api).await;
        self.apply_suggest(response)
    }

    /// Suggest after adding text typed but not yet submitted
    pub async fn suggest_with_pending(
        &mut self,
        api: &dyn RecipeApi,
        pending: &str,
    ) -> SuggestOutcome {
        self.add_ingredients(pending);
        self.suggest(api).await
    }

    /// Add every ingredient of a featured recipe and suggest
    pub async fn pick_featured(
        &mut self,
        api: &dyn RecipeApi,
        featured: &FeaturedRecipe,
    ) -> SuggestOutcome {
        let joined = featured.recipe.ingredients.join(", ");
        self.suggest_with_pending(api, &joined).await
    }

    pub fn on_sentinel_visible(&mut self, id: SentinelId) -> Option<PaintedPage> {
        self.renderer.on_sentinel_visible(id)
    }

    pub fn load_more(&mut self) -> Option<PaintedPage> {
        self.renderer.load_more()
    }

    /// Look up a recipe among the painted suggestions
    pub fn painted_recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.renderer
            .painted()
            .iter()
            .map(|c| &c.recipe)
            .find(|r| &r.id == id)
    }

    /// Copy a painted recipe. Returns `false` when no such card is painted.
    pub fn copy(
        &self,
        id: &RecipeId,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match self.painted_recipe(id) {
            Some(recipe) => {
                copy_recipe(recipe, clipboard, notifier);
                true
            }
            None => false,
        }
    }

    /// Share a painted recipe. Returns `false` when no such card is painted.
    pub fn share(
        &self,
        id: &RecipeId,
        share_sheet: Option<&mut dyn ShareSheet>,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> bool {
        match self.painted_recipe(id) {
            Some(recipe) => {
                share_recipe(recipe, share_sheet, clipboard, notifier);
                true
            }
            None => false,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App::from_config(&ClientConfig::default())
    }
}

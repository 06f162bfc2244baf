use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::SuggestError;
use crate::model::{AnalyzeGapsRequest, GapAnalysis, GapInfo, Recipe, RecipeCatalog};

/// The external recipe service: a catalog listing plus batched gap analysis
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch the full recipe catalog
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, SuggestError>;

    /// Analyze every recipe against the available ingredients in a single request
    async fn analyze_gaps(
        &self,
        recipes: &[Recipe],
        available_ingredients: &[String],
    ) -> Result<HashMap<String, GapInfo>, SuggestError>;
}

/// [`RecipeApi`] over HTTP
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, SuggestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(HttpRecipeApi {
            client,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    /// Create a client with default settings against `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SuggestError> {
        let config = ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, SuggestError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SuggestError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, SuggestError> {
        let response = self
            .client
            .get(format!("{}/api/recipes", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::CatalogUnavailable {
                status: status.as_u16(),
            });
        }

        let catalog: RecipeCatalog = response.json().await?;
        debug!("Fetched {} recipes", catalog.recipes.len());
        Ok(catalog.recipes)
    }

    async fn analyze_gaps(
        &self,
        recipes: &[Recipe],
        available_ingredients: &[String],
    ) -> Result<HashMap<String, GapInfo>, SuggestError> {
        let body = AnalyzeGapsRequest {
            recipe_ids: recipes.iter().map(|r| &r.id).collect(),
            available_ingredients,
        };

        let response = self
            .client
            .post(format!("{}/api/analyze_gaps", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await?;
            return Err(SuggestError::AnalysisFailed(text));
        }

        let analysis: GapAnalysis = response.json().await?;
        debug!("Received gap analysis for {} recipes", analysis.gaps.len());
        Ok(analysis.gaps)
    }
}

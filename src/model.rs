use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier of a catalog recipe.
///
/// The API is free to use numeric or textual ids. The id is echoed back to the
/// analysis endpoint in its original form, while the gap map is always keyed by
/// its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(id: i64) -> Self {
        RecipeId::Number(id)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId::Text(id.to_string())
    }
}

/// A catalog recipe as served by `GET /api/recipes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
}

/// Per-recipe result of the gap analysis.
///
/// Every field defaults to empty, so both a missing entry and a partial entry
/// behave like "nothing missing, nothing covered, no substitutions".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub covered: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub substitution_candidates: HashMap<String, String>,
}

/// A recipe merged with its gap analysis for the current ingredient set
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecipe {
    pub recipe: Recipe,
    pub missing: Vec<String>,
    pub covered: Vec<String>,
    /// Needed ingredient → suggested substitute, ordered by needed ingredient
    pub substitutions: BTreeMap<String, String>,
}

impl CombinedRecipe {
    pub fn new(recipe: Recipe, gap: GapInfo) -> Self {
        CombinedRecipe {
            recipe,
            missing: gap.missing,
            covered: gap.covered,
            substitutions: gap.substitution_candidates.into_iter().collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.recipe.title
    }

    pub fn is_makeable(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` gap entry counts as an empty gap
fn gaps_or_default<'de, D>(deserializer: D) -> Result<HashMap<String, GapInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let gaps: Option<HashMap<String, Option<GapInfo>>> = Option::deserialize(deserializer)?;
    Ok(gaps
        .unwrap_or_default()
        .into_iter()
        .map(|(id, gap)| (id, gap.unwrap_or_default()))
        .collect())
}

/// Response envelope of `GET /api/recipes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<Recipe>,
}

/// Request body of `POST /api/analyze_gaps`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeGapsRequest<'a> {
    pub recipe_ids: Vec<&'a RecipeId>,
    pub available_ingredients: &'a [String],
}

/// Response envelope of `POST /api/analyze_gaps`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GapAnalysis {
    #[serde(default, deserialize_with = "gaps_or_default")]
    pub gaps: HashMap<String, GapInfo>,
}

//! Merging the catalog with gap analysis and ordering the result.

use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{CombinedRecipe, GapInfo, Recipe};

/// Combine each recipe with its gap entry, defaulting to an empty gap when the
/// analysis has nothing for that id. Recipes sharing an id share its gap.
pub fn combine(recipes: Vec<Recipe>, gaps: &HashMap<String, GapInfo>) -> Vec<CombinedRecipe> {
    recipes
        .into_iter()
        .map(|recipe| {
            let gap = gaps
                .get(&recipe.id.to_string())
                .cloned()
                .unwrap_or_default();
            CombinedRecipe::new(recipe, gap)
        })
        .collect()
}

/// Order by number of missing ingredients, then by title.
///
/// The sort is stable: entries equal on both keys keep their catalog order.
pub fn rank(combined: &mut [CombinedRecipe]) {
    combined.sort_by(|a, b| {
        a.missing
            .len()
            .cmp(&b.missing.len())
            .then_with(|| locale_compare(a.title(), b.title()))
    });
}

pub fn combine_and_rank(
    recipes: Vec<Recipe>,
    gaps: &HashMap<String, GapInfo>,
) -> Vec<CombinedRecipe> {
    let mut combined = combine(recipes, gaps);
    rank(&mut combined);
    combined
}

/// Collation close to a browser's default `localeCompare`.
///
/// Titles are compared on three levels: base letters ignoring accents and
/// case, then accents (unaccented first), then case (lower case first).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| with_accents(a).cmp(with_accents(b)))
        .then_with(|| case_ranks(a).cmp(case_ranks(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn with_accents(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_ranks(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).map(case_rank)
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}

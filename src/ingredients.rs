//! The set of ingredients the user has declared.
//!
//! Tokens are normalized (trimmed, lower-cased) on the way in and kept in order
//! of first appearance. The set never contains the same token twice.

use log::debug;

/// A removable ingredient chip, as displayed next to the input box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet {
    items: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every comma-separated token of `raw`.
    ///
    /// Returns the number of tokens that were not already present. Empty or
    /// whitespace-only input adds nothing.
    pub fn add(&mut self, raw: &str) -> usize {
        let mut added = 0;
        for token in raw.split(',').map(normalize).filter(|t| !t.is_empty()) {
            if !self.contains(&token) {
                self.items.push(token);
                added += 1;
            }
        }
        if added > 0 {
            debug!("Added {} ingredient(s), {} total", added, self.items.len());
        }
        added
    }

    /// Remove the ingredient at `index`. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, token: &str) -> bool {
        self.items.iter().any(|i| i == token)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn chips(&self) -> Vec<Chip> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, label)| Chip {
                index,
                label: label.clone(),
            })
            .collect()
    }
}

fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

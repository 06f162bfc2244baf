//! Copy and share actions for a single recipe.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use std::io::Write;

use crate::error::ActionError;
use crate::model::Recipe;

pub const COPY_SUCCESS: &str = "Recipe copied to clipboard";
pub const COPY_FAILURE: &str = "Copy failed";

/// Plain-text form of a recipe, used by both copy and share
pub fn recipe_text(recipe: &Recipe) -> String {
    format!(
        "{}\n\nIngredients:\n- {}\n\nSteps:\n- {}",
        recipe.title,
        recipe.ingredients.join("\n- "),
        recipe.instructions.join("\n- ")
    )
}

/// System clipboard capability
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ActionError>;
}

/// Native share capability
pub trait ShareSheet {
    /// Returns [`ActionError::Cancelled`] when the user dismisses the sheet
    fn share(&mut self, title: &str, text: &str) -> Result<(), ActionError>;
}

/// Blocking user-facing notices (alerts)
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Copy the recipe text to the clipboard and report the outcome
pub fn copy_recipe(recipe: &Recipe, clipboard: &mut dyn Clipboard, notifier: &mut dyn Notifier) {
    match clipboard.write_text(&recipe_text(recipe)) {
        Ok(()) => notifier.notify(COPY_SUCCESS),
        Err(e) => {
            warn!("Copying '{}' failed: {}", recipe.title, e);
            notifier.notify(COPY_FAILURE);
        }
    }
}

/// Share the recipe text, falling back to copying when no share sheet exists.
///
/// Cancellation is silent.
pub fn share_recipe(
    recipe: &Recipe,
    share_sheet: Option<&mut dyn ShareSheet>,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) {
    let Some(sheet) = share_sheet else {
        copy_recipe(recipe, clipboard, notifier);
        return;
    };

    match sheet.share(&recipe.title, &recipe_text(recipe)) {
        Ok(()) => {}
        Err(ActionError::Cancelled) => debug!("Share of '{}' cancelled", recipe.title),
        Err(e) => {
            warn!("Sharing '{}' failed: {}", recipe.title, e);
            notifier.notify(&e.to_string());
        }
    }
}

/// Clipboard for terminals that understand the OSC 52 escape sequence
pub struct TerminalClipboard<W: Write> {
    out: W,
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        TerminalClipboard { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalClipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        TerminalClipboard::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ActionError> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))
            .and_then(|_| self.out.flush())
            .map_err(|e| ActionError::Clipboard(e.to_string()))
    }
}

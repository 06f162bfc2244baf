//! Incremental rendering of ranked suggestions.
//!
//! The ranked list is revealed one page at a time. While more items remain past
//! the painted slice, a single [`Sentinel`] is armed; the presentation layer
//! reports its visibility through [`Renderer::on_sentinel_visible`]. Each
//! sentinel advances the cursor at most once. Every advance repaints the whole
//! slice `[0, (page + 1) * page_size)`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::debug;
use std::fmt::Write;
use std::ops::Range;

use crate::model::{CombinedRecipe, RecipeId};

/// Default number of cards per page
pub const PAGE_SIZE: usize = 6;

/// Maximum number of tags shown on a card
pub const MAX_TAGS: usize = 4;

pub const IDLE_PLACEHOLDER: &str = "Add ingredients and press suggest to see recipes.";
pub const EMPTY_SET_NOTICE: &str = "Add at least one ingredient to see recipes.";
pub const LOADING_PLACEHOLDER: &str = "Loading recipes";
pub const NO_SUGGESTIONS: &str =
    "No suggestions. Try adding more ingredients or loosening constraints.";

/// Pagination cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Paginator {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn reset(&mut self) {
        self.current_page = 0;
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    /// Number of items painted so far, out of `total`
    pub fn visible_len(&self, total: usize) -> usize {
        ((self.current_page + 1) * self.page_size).min(total)
    }

    /// Items revealed by the current page alone
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(total);
        start..self.visible_len(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        (self.current_page + 1) * self.page_size < total
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator::new(PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentinelId(u64);

/// Marker meaning "more pages exist", watched for visibility.
///
/// A sentinel is dropped as soon as it fires, so each id advances at most one
/// page.
#[derive(Debug)]
pub struct Sentinel {
    id: SentinelId,
}

impl Sentinel {
    fn new(id: SentinelId) -> Self {
        Sentinel { id }
    }

    pub fn id(&self) -> SentinelId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// No combined list yet
    Idle,
    /// A page is painted and a sentinel is waiting to become visible
    AwaitingScroll(SentinelId),
    /// Every item is painted
    Exhausted,
}

/// What the suggestions region currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionsView {
    Placeholder(&'static str),
    Notice(&'static str),
    Loading,
    Error(String),
    Empty,
    Cards {
        cards: Vec<RecipeCard>,
        sentinel: Option<SentinelId>,
    },
}

impl SuggestionsView {
    /// The single line of text shown when the region holds no cards
    pub fn message(&self) -> Option<String> {
        match self {
            SuggestionsView::Placeholder(text) | SuggestionsView::Notice(text) => {
                Some(text.to_string())
            }
            SuggestionsView::Loading => Some(LOADING_PLACEHOLDER.to_string()),
            SuggestionsView::Error(message) => Some(format!("Error: {}", message)),
            SuggestionsView::Empty => Some(NO_SUGGESTIONS.to_string()),
            SuggestionsView::Cards { .. } => None,
        }
    }
}

/// The result of painting a page
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedPage {
    pub page: usize,
    /// Items newly revealed by this page
    pub revealed: Range<usize>,
    /// All cards painted so far, in ranked order
    pub cards: Vec<RecipeCard>,
    pub sentinel: Option<SentinelId>,
}

#[derive(Debug, Clone, PartialEq)]
enum Region {
    Idle,
    Notice(&'static str),
    Loading,
    Error(String),
    List,
}

#[derive(Debug)]
pub struct Renderer {
    items: Vec<CombinedRecipe>,
    cursor: Paginator,
    sentinel: Option<Sentinel>,
    next_sentinel: u64,
    region: Region,
}

impl Renderer {
    pub fn new(page_size: usize) -> Self {
        Renderer {
            items: Vec::new(),
            cursor: Paginator::new(page_size),
            sentinel: None,
            next_sentinel: 0,
            region: Region::Idle,
        }
    }

    pub fn state(&self) -> RenderState {
        match (&self.region, &self.sentinel) {
            (Region::List, Some(sentinel)) => RenderState::AwaitingScroll(sentinel.id()),
            (Region::List, _) => RenderState::Exhausted,
            _ => RenderState::Idle,
        }
    }

    pub fn cursor(&self) -> &Paginator {
        &self.cursor
    }

    pub fn sentinel(&self) -> Option<&Sentinel> {
        self.sentinel.as_ref()
    }

    pub fn items(&self) -> &[CombinedRecipe] {
        &self.items
    }

    /// Items currently painted
    pub fn painted(&self) -> &[CombinedRecipe] {
        match self.region {
            Region::List => &self.items[..self.cursor.visible_len(self.items.len())],
            _ => &[],
        }
    }

    /// Replace the list and paint page 0, discarding any previous sentinel
    pub fn load(&mut self, items: Vec<CombinedRecipe>) -> PaintedPage {
        self.items = items;
        self.cursor.reset();
        self.sentinel = None;
        self.region = Region::List;
        self.paint()
    }

    /// Handle a visibility event for `id`.
    ///
    /// Events for any id other than the live sentinel are ignored. That covers
    /// a sentinel that already fired, since firing drops it.
    pub fn on_sentinel_visible(&mut self, id: SentinelId) -> Option<PaintedPage> {
        if self.sentinel.as_ref().map(Sentinel::id) != Some(id) {
            return None;
        }
        self.sentinel = None;
        self.cursor.advance();
        debug!("Advancing to page {}", self.cursor.current_page());
        Some(self.paint())
    }

    /// Advance through whichever sentinel is currently live
    pub fn load_more(&mut self) -> Option<PaintedPage> {
        let id = self.sentinel.as_ref()?.id();
        self.on_sentinel_visible(id)
    }

    pub fn show_notice(&mut self, notice: &'static str) {
        self.sentinel = None;
        self.region = Region::Notice(notice);
    }

    pub fn show_loading(&mut self) {
        self.sentinel = None;
        self.region = Region::Loading;
    }

    /// Show an inline error. The ranked list is kept but no longer displayed.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.sentinel = None;
        self.region = Region::Error(message.into());
    }

    /// Drop the list and return to the idle placeholder
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor.reset();
        self.sentinel = None;
        self.region = Region::Idle;
    }

    pub fn view(&self) -> SuggestionsView {
        match &self.region {
            Region::Idle => SuggestionsView::Placeholder(IDLE_PLACEHOLDER),
            Region::Notice(text) => SuggestionsView::Notice(*text),
            Region::Loading => SuggestionsView::Loading,
            Region::Error(message) => SuggestionsView::Error(message.clone()),
            Region::List if self.items.is_empty() => SuggestionsView::Empty,
            Region::List => SuggestionsView::Cards {
                cards: render_slice(self.painted()),
                sentinel: self.sentinel.as_ref().map(Sentinel::id),
            },
        }
    }

    fn paint(&mut self) -> PaintedPage {
        let total = self.items.len();
        if self.cursor.has_more(total) {
            let id = SentinelId(self.next_sentinel);
            self.next_sentinel += 1;
            self.sentinel = Some(Sentinel::new(id));
        }

        PaintedPage {
            page: self.cursor.current_page(),
            revealed: self.cursor.page_range(total),
            cards: render_slice(self.painted()),
            sentinel: self.sentinel.as_ref().map(Sentinel::id),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Copy,
    Share,
}

/// An action button bound to a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub recipe_id: RecipeId,
}

/// Presentation-agnostic view of one suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    pub tags: Vec<String>,
    pub makeable: bool,
    /// `Makeable` or `<n> missing`
    pub badge: String,
    pub status: String,
    /// `need → use` lines
    pub substitutes: Vec<String>,
    pub covered_count: usize,
    pub missing_count: usize,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub actions: Vec<CardAction>,
}

impl RecipeCard {
    pub fn from_combined(combined: &CombinedRecipe) -> Self {
        let recipe = &combined.recipe;
        let makeable = combined.is_makeable();
        let badge = if makeable {
            "Makeable".to_string()
        } else {
            format!("{} missing", combined.missing.len())
        };
        let status = if makeable {
            "Covered: All Ingredients".to_string()
        } else {
            format!("Missing: {}", combined.missing.join(", "))
        };

        RecipeCard {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            tags: recipe.tags.iter().take(MAX_TAGS).cloned().collect(),
            makeable,
            badge,
            status,
            substitutes: combined
                .substitutions
                .iter()
                .map(|(need, with)| format!("{} → {}", need, with))
                .collect(),
            covered_count: combined.covered.len(),
            missing_count: combined.missing.len(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.instructions.clone(),
            actions: [ActionKind::Copy, ActionKind::Share]
                .into_iter()
                .map(|kind| CardAction {
                    kind,
                    recipe_id: recipe.id.clone(),
                })
                .collect(),
        }
    }

    /// HTML markup for the card. All recipe text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let class = if self.makeable { "makeable" } else { "needs" };
        let id = encode_double_quoted_attribute(&self.id.to_string()).into_owned();

        let _ = write!(
            html,
            r#"<div class="card recipe-card {}"><div class="card-header"><h3>{}</h3><div class="badge">{}</div></div>"#,
            class,
            encode_text(&self.title),
            encode_text(&self.badge)
        );

        html.push_str(r#"<div class="meta small">"#);
        for tag in &self.tags {
            let _ = write!(html, r#"<span class="pill">{}</span>"#, encode_text(tag));
        }
        html.push_str("</div>");

        let _ = write!(
            html,
            r#"<div class="details"><div class="status">{}</div>"#,
            encode_text(&self.status)
        );
        if !self.substitutes.is_empty() {
            let _ = write!(
                html,
                r#"<div class="status subs">Substitutes: {}</div>"#,
                encode_text(&self.substitutes.join(", "))
            );
        }

        push_list(&mut html, "Ingredients", "ul", &self.ingredients);
        push_list(&mut html, "Steps", "ol", &self.steps);

        html.push_str(r#"<div class="card-actions">"#);
        for action in &self.actions {
            let (class, label) = match action.kind {
                ActionKind::Copy => ("copy", "Copy"),
                ActionKind::Share => ("share", "Share"),
            };
            let _ = write!(
                html,
                r#"<button class="btn {}" data-id="{}">{}</button>"#,
                class, id, label
            );
        }
        html.push_str("</div></div></div>");
        html
    }
}

fn push_list(html: &mut String, summary: &str, tag: &str, items: &[String]) {
    let _ = write!(html, "<details><summary>{}</summary><{}>", summary, tag);
    for item in items {
        let _ = write!(html, "<li>{}</li>", encode_text(item));
    }
    let _ = write!(html, "</{}></details>", tag);
}

/// Build the view models for a slice of ranked recipes
pub fn render_slice(items: &[CombinedRecipe]) -> Vec<RecipeCard> {
    items.iter().map(RecipeCard::from_combined).collect()
}

//! Filter state and the row predicate.
//!
//! Filtering is conjunctive: every selected tag, every selected faction and
//! the free-text fragment must all match for a row to stay visible. An
//! empty selection of a kind does not filter that kind at all.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use regex::Regex;

use crate::rows::RowAttributes;
use crate::widgets::{TableWidget, FILTER_INSTALLED_MARKER};

/// Filter state shared between the combobox bridge (writer) and the row
/// predicate (reader).
pub type SharedFilterState = Rc<RefCell<FilterState>>;

/// Case-insensitive whole-token matcher.
///
/// A token matches only when it is not embedded in a longer word. Hyphens
/// count as word characters, so `Air` does not match inside `Anti-Air`.
#[derive(Debug, Clone)]
pub struct TokenMatcher {
    token: String,
    pattern: Regex,
}

impl TokenMatcher {
    /// Compile a matcher for `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiled pattern exceeds the regex size limit.
    pub fn new(token: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)(?:^|[^\w-]){}(?:[^\w-]|$)",
            regex::escape(token)
        ))?;
        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    /// Token this matcher looks for.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether `haystack` contains the token as a whole word.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }
}

/// Currently selected facets and free-text fragment.
///
/// Reconstructed empty on every page load; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    selected_tags: BTreeSet<String>,
    selected_factions: BTreeSet<String>,
    free_text: String,
    tag_matchers: Vec<TokenMatcher>,
    faction_matchers: Vec<TokenMatcher>,
}

impl FilterState {
    /// Create an empty filter that matches every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty filter behind a shared handle.
    #[must_use]
    pub fn shared() -> SharedFilterState {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Recompute all three dimensions at once.
    ///
    /// Free text is trimmed and lowercased.
    pub fn update<T, F>(&mut self, tags: T, factions: F, free_text: &str)
    where
        T: IntoIterator<Item = String>,
        F: IntoIterator<Item = String>,
    {
        self.selected_tags = tags.into_iter().collect();
        self.selected_factions = factions.into_iter().collect();
        self.free_text = free_text.trim().to_lowercase();
        self.tag_matchers = compile(&self.selected_tags);
        self.faction_matchers = compile(&self.selected_factions);
    }

    /// Selected tag values.
    #[must_use]
    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    /// Selected faction values.
    #[must_use]
    pub fn selected_factions(&self) -> &BTreeSet<String> {
        &self.selected_factions
    }

    /// Normalised free-text fragment.
    #[must_use]
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Whether no dimension filters anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_tags.is_empty() && self.selected_factions.is_empty() && self.free_text.is_empty()
    }

    /// Row predicate.
    #[must_use]
    pub fn matches(&self, row: &RowAttributes) -> bool {
        self.tag_matchers.iter().all(|m| m.is_match(&row.tags))
            && self.faction_matchers.iter().all(|m| m.is_match(&row.faction))
            && (self.free_text.is_empty()
                || row.search_text.to_lowercase().contains(&self.free_text))
    }
}

fn compile(tokens: &BTreeSet<String>) -> Vec<TokenMatcher> {
    tokens
        .iter()
        .filter_map(|token| match TokenMatcher::new(token) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                tracing::warn!(token = %token, "ignoring unmatchable facet: {e}");
                None
            }
        })
        .collect()
}

/// Evaluate a row against the current filter state.
#[must_use]
pub fn row_matches(row: &RowAttributes, state: &FilterState) -> bool {
    state.matches(row)
}

/// Install the row predicate into `table` once and return the state it reads.
///
/// The predicate reads the state on every evaluation and never mutates it.
/// If this table instance already has a predicate, its state is returned
/// and the table is left untouched, so a re-mounted search drives the
/// predicate that is actually installed.
pub fn install_row_filter<T: TableWidget>(table: &mut T) -> SharedFilterState {
    if let Some(state) = table.row_filter_state() {
        tracing::debug!("row filter already installed");
        return state;
    }

    let state = FilterState::shared();
    let reader = Rc::clone(&state);
    table.push_row_filter(Box::new(move |row: &RowAttributes| reader.borrow().matches(row)));
    table.set_row_filter_state(Rc::clone(&state));
    table.set_marker(FILTER_INSTALLED_MARKER);
    table.draw();
    tracing::debug!("row filter installed");
    state
}

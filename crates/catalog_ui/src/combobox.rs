//! Bridge between the multi-select combobox, its free-text input and the
//! filter state.
//!
//! Every selection change goes through [`ComboboxBridge::set_selection`],
//! which writes the widget and then re-reads it, so the filter can never
//! disagree with what the widget shows.

use catalog_core::facets::{FacetKind, FacetOption};

use crate::filter::{install_row_filter, SharedFilterState};
use crate::widgets::{MultiSelect, TableWidget};

/// Keys the free-text input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Commit the typed text as a facet.
    Enter,
    /// Remove the last selected facet when the input is empty.
    Backspace,
    /// Anything else.
    Other,
}

/// Owns the filter state and keeps it in step with the widgets.
pub struct ComboboxBridge<S, T> {
    select: S,
    table: T,
    options: Vec<FacetOption>,
    filter: SharedFilterState,
    input: String,
    suppress_open: bool,
}

impl<S, T> ComboboxBridge<S, T>
where
    S: MultiSelect,
    T: TableWidget,
{
    /// Create the bridge and install the row predicate into `table`.
    ///
    /// A table that already carries a predicate keeps it; the bridge takes
    /// over that predicate's state.
    pub fn new(select: S, mut table: T, options: Vec<FacetOption>) -> Self {
        let filter = install_row_filter(&mut table);
        let mut bridge = Self {
            select,
            table,
            options,
            filter,
            input: String::new(),
            suppress_open: false,
        };
        // The widget may have been mounted with a preselection.
        bridge.apply_filters();
        bridge
    }

    /// Shared handle to the filter state.
    #[must_use]
    pub fn filter_state(&self) -> SharedFilterState {
        SharedFilterState::clone(&self.filter)
    }

    /// Options known to the combobox.
    #[must_use]
    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }

    /// Current free-text input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The multi-select handle.
    pub fn select(&self) -> &S {
        &self.select
    }

    /// The table handle.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Recompute every filter dimension from the widgets and redraw once.
    pub fn apply_filters(&mut self) {
        let mut tags = Vec::new();
        let mut factions = Vec::new();
        for value in self.select.selected() {
            match self.kind_of(&value) {
                Some(FacetKind::Tag) => tags.push(value),
                Some(FacetKind::Faction) => factions.push(value),
                None => tracing::warn!(value = %value, "selected value has no option"),
            }
        }

        tracing::debug!(?tags, ?factions, text = %self.input, "applying filters");
        self.filter.borrow_mut().update(tags, factions, &self.input);
        self.table.draw();
    }

    /// Handle the widget's selection-changed notification.
    pub fn on_selection_changed(&mut self) {
        self.apply_filters();
    }

    /// Handle an input event on the free-text field.
    pub fn on_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.apply_filters();
    }

    /// Handle a keydown on the free-text field.
    ///
    /// Returns `true` when the key was consumed.
    pub fn on_key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => self.commit_input(),
            Key::Backspace if self.input.is_empty() => self.remove_last(),
            Key::Backspace | Key::Other => false,
        }
    }

    /// Handle a click on an inline tag chip.
    pub fn on_tag_chip_click(&mut self, value: &str) {
        let Some(option) = self.find_option(value, Some(FacetKind::Tag)) else {
            tracing::warn!(value, "tag chip has no matching option");
            return;
        };
        let value = option.value.clone();
        self.add_to_selection(value);
        self.select.close();
        self.suppress_open = true;
    }

    /// Ask whether the dropdown may open.
    ///
    /// The first attempt after a tag chip click is refused and the dropdown
    /// stays closed.
    pub fn on_open_request(&mut self) -> bool {
        if std::mem::take(&mut self.suppress_open) {
            self.select.close();
            return false;
        }
        true
    }

    /// Replace the selection and re-filter.
    pub fn set_selection(&mut self, values: Vec<String>) {
        self.select.set_selected(values);
        self.apply_filters();
    }

    fn commit_input(&mut self) -> bool {
        let Some(option) = self.find_option(self.input.trim(), None) else {
            return false;
        };
        let value = option.value.clone();
        self.input.clear();
        if !self.add_to_selection(value) {
            self.apply_filters();
        }
        true
    }

    fn remove_last(&mut self) -> bool {
        let mut selected = self.select.selected();
        if selected.pop().is_none() {
            return false;
        }
        self.set_selection(selected);
        true
    }

    /// Returns whether the selection changed.
    fn add_to_selection(&mut self, value: String) -> bool {
        let mut selected = self.select.selected();
        if selected.contains(&value) {
            return false;
        }
        selected.push(value);
        self.set_selection(selected);
        true
    }

    fn kind_of(&self, value: &str) -> Option<FacetKind> {
        self.options.iter().find(|o| o.value == value).map(|o| o.kind)
    }

    fn find_option(&self, text: &str, kind: Option<FacetKind>) -> Option<&FacetOption> {
        if text.is_empty() {
            return None;
        }
        let wanted = text.to_lowercase();
        self.options
            .iter()
            .filter(|o| kind.map_or(true, |k| o.kind == k))
            .find(|o| o.value.to_lowercase() == wanted)
    }
}

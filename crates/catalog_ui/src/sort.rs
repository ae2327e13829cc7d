//! Sort state and its projection onto the URL.
//!
//! The table widget owns the live sort. The `sort` query parameter mirrors
//! its primary column: `key` for ascending, `-key` for descending, absent
//! when unsorted. The URL is read once on load and rewritten (in place, no
//! new history entry) on every sort change.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query;
use crate::widgets::{History, TableWidget, SORT_BOUND_MARKER};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Sort state as carried by the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Sorted column key, `None` when unsorted.
    pub column_key: Option<String>,
    /// Direction of the sorted column.
    pub direction: SortDirection,
}

impl SortState {
    /// Sorted by `key` in `direction`.
    #[must_use]
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: Some(key.into()),
            direction,
        }
    }

    /// Parse a `sort` parameter value. Empty values mean unsorted.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_ui::sort::{SortDirection, SortState};
    ///
    /// let state = SortState::from_param("-cost");
    /// assert_eq!(state.column_key.as_deref(), Some("cost"));
    /// assert_eq!(state.direction, SortDirection::Desc);
    /// ```
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        let (key, direction) = match value.strip_prefix('-') {
            Some(key) => (key, SortDirection::Desc),
            None => (value, SortDirection::Asc),
        };
        if key.is_empty() {
            return Self::default();
        }
        Self::new(key, direction)
    }

    /// Parameter value, `None` when unsorted.
    #[must_use]
    pub fn to_param(&self) -> Option<String> {
        let key = self.column_key.as_deref()?;
        Some(match self.direction {
            SortDirection::Asc => key.to_string(),
            SortDirection::Desc => format!("-{key}"),
        })
    }

    /// Read sort state from a URL.
    #[must_use]
    pub fn from_url(url: &str, param: &str) -> Self {
        query::get_param(url, param)
            .map(|value| Self::from_param(&value))
            .unwrap_or_default()
    }

    /// Write sort state into a URL.
    #[must_use]
    pub fn apply_to_url(&self, url: &str, param: &str) -> String {
        query::set_param(url, param, self.to_param().as_deref())
    }
}

/// A table column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortHeader {
    /// Display label.
    pub label: String,
    /// Key used in the URL; headers without one never sync.
    #[serde(default)]
    pub sort_key: Option<String>,
}

impl SortHeader {
    /// Header with a sort key.
    #[must_use]
    pub fn sortable(label: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sort_key: Some(sort_key.into()),
        }
    }

    /// Header without a sort key.
    #[must_use]
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sort_key: None,
        }
    }
}

/// Bidirectional mapping between table columns and URL sort keys.
#[derive(Debug, Clone)]
pub struct SortSync {
    param: String,
    key_to_column: BTreeMap<String, usize>,
    column_to_key: BTreeMap<usize, String>,
}

impl SortSync {
    /// Build the mapping from column headers. Header index is column index.
    #[must_use]
    pub fn new(headers: &[SortHeader], param: impl Into<String>) -> Self {
        let mut key_to_column = BTreeMap::new();
        let mut column_to_key = BTreeMap::new();
        for (column, header) in headers.iter().enumerate() {
            if let Some(key) = header.sort_key.as_deref().filter(|k| !k.is_empty()) {
                key_to_column.insert(key.to_string(), column);
                column_to_key.insert(column, key.to_string());
            }
        }
        Self {
            param: param.into(),
            key_to_column,
            column_to_key,
        }
    }

    /// Bind sort sync to `table` once and restore the sort from the URL.
    ///
    /// Returns `None` if this table instance is already bound.
    pub fn bind<T, H>(table: &mut T, history: &H, param: &str) -> Option<Self>
    where
        T: TableWidget,
        H: History,
    {
        if table.has_marker(SORT_BOUND_MARKER) {
            tracing::debug!("sort sync already bound");
            return None;
        }
        table.set_marker(SORT_BOUND_MARKER);

        let sync = Self::new(&table.headers(), param);
        sync.restore(table, history);
        Some(sync)
    }

    /// Column index for a sort key.
    #[must_use]
    pub fn column_for(&self, key: &str) -> Option<usize> {
        self.key_to_column.get(key).copied()
    }

    /// Sort key for a column index.
    #[must_use]
    pub fn key_for(&self, column: usize) -> Option<&str> {
        self.column_to_key.get(&column).map(String::as_str)
    }

    /// Apply the URL's sort to the table.
    ///
    /// Unknown or empty keys leave the table's default order untouched.
    /// Returns whether a sort was applied.
    pub fn restore<T, H>(&self, table: &mut T, history: &H) -> bool
    where
        T: TableWidget,
        H: History,
    {
        let state = SortState::from_url(&history.href(), &self.param);
        let Some(key) = state.column_key.as_deref() else {
            return false;
        };
        match self.column_for(key) {
            Some(column) => {
                tracing::debug!(key, column, direction = %state.direction, "restoring sort from URL");
                table.set_order(column, state.direction);
                true
            }
            None => {
                tracing::warn!(key, "ignoring unrecognised sort key");
                false
            }
        }
    }

    /// Sort state for a widget order. Only the primary column counts.
    ///
    /// Returns `None` when the primary column has no sort key.
    #[must_use]
    pub fn state_for_order(&self, order: &[(usize, SortDirection)]) -> Option<SortState> {
        match order.first() {
            None => Some(SortState::default()),
            Some(&(column, direction)) => self
                .key_for(column)
                .map(|key| SortState::new(key, direction)),
        }
    }

    /// Handle the table's sort-changed notification.
    ///
    /// Rewrites the current history entry; columns without a sort key
    /// leave the URL unchanged.
    pub fn on_order_changed<T, H>(&self, table: &T, history: &mut H)
    where
        T: TableWidget,
        H: History,
    {
        let Some(state) = self.state_for_order(&table.order()) else {
            return;
        };
        let href = history.href();
        let url = state.apply_to_url(&href, &self.param);
        if url != href {
            tracing::debug!(sort = ?state.to_param(), "sort changed");
            history.replace_url(&url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_round_trip() {
        let state = SortState::new("cost", SortDirection::Desc);
        let url = state.apply_to_url("https://units.example/?page=2", "sort");
        assert_eq!(url, "https://units.example/?page=2&sort=-cost");
        let restored = SortState::from_url(&url, "sort");
        assert_eq!(restored.column_key.as_deref(), Some("cost"));
        assert_eq!(restored.direction, SortDirection::Desc);
    }

    #[test]
    fn test_from_param_edge_cases() {
        assert_eq!(SortState::from_param(""), SortState::default());
        assert_eq!(SortState::from_param("-"), SortState::default());
        assert_eq!(
            SortState::from_param("--x"),
            SortState::new("-x", SortDirection::Desc)
        );
        assert_eq!(SortState::default().to_param(), None);
    }

    #[test]
    fn test_unsorted_removes_param() {
        let url = SortState::default().apply_to_url("/units?sort=cost", "sort");
        assert_eq!(url, "/units");
    }

    #[test]
    fn test_mapping_uses_real_column_indices() {
        let headers = vec![
            SortHeader::plain("Icon"),
            SortHeader::sortable("Name", "name"),
            SortHeader::plain("Tags"),
            SortHeader::sortable("Metal", "cost"),
        ];
        let sync = SortSync::new(&headers, "sort");
        assert_eq!(sync.column_for("name"), Some(1));
        assert_eq!(sync.column_for("cost"), Some(3));
        assert_eq!(sync.key_for(2), None);
        assert_eq!(sync.column_for("bogus"), None);
    }

    #[test]
    fn test_state_for_order_primary_only() {
        let sync = SortSync::new(
            &[SortHeader::sortable("Name", "name"), SortHeader::sortable("Metal", "cost")],
            "sort",
        );
        let state = sync
            .state_for_order(&[(1, SortDirection::Desc), (0, SortDirection::Asc)])
            .unwrap();
        assert_eq!(state.to_param().as_deref(), Some("-cost"));
        assert_eq!(sync.state_for_order(&[]), Some(SortState::default()));
        assert_eq!(sync.state_for_order(&[(7, SortDirection::Asc)]), None);
    }
}

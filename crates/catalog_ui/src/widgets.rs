//! Rendering boundary: the externally supplied widgets this crate drives.
//!
//! The table, the multi-select and the browser history are never reached
//! through globals. Every bridge receives explicit handles implementing
//! these traits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::filter::SharedFilterState;
use crate::rows::RowAttributes;
use crate::sort::{SortDirection, SortHeader};

/// Marker set on a table once the row filter is installed.
pub const FILTER_INSTALLED_MARKER: &str = "data-unit-filter";

/// Marker set on a table once sort sync is bound.
pub const SORT_BOUND_MARKER: &str = "data-sort-sync";

/// Marker set on the search mount target once mounted.
pub const MOUNTED_MARKER: &str = "data-mounted";

/// Per-row inclusion predicate installed into a table.
pub type RowFilter = Box<dyn Fn(&RowAttributes) -> bool>;

/// Idempotency flags recorded on a DOM node.
pub trait Markers {
    /// Whether `marker` has been set.
    fn has_marker(&self, marker: &str) -> bool;

    /// Set `marker`.
    fn set_marker(&mut self, marker: &str);
}

/// A pre-built sortable, searchable table.
pub trait TableWidget: Markers {
    /// Register a custom per-row inclusion predicate.
    fn push_row_filter(&mut self, filter: RowFilter);

    /// Filter state read by this table's installed row predicate.
    fn row_filter_state(&self) -> Option<SharedFilterState>;

    /// Record the filter state the installed row predicate reads.
    fn set_row_filter_state(&mut self, state: SharedFilterState);

    /// Re-evaluate row visibility against every registered predicate and redraw.
    fn draw(&mut self);

    /// Column headers, indexed by column.
    fn headers(&self) -> Vec<SortHeader>;

    /// Active sort, primary column first. Empty when unsorted.
    fn order(&self) -> Vec<(usize, SortDirection)>;

    /// Sort by a single column and redraw.
    fn set_order(&mut self, column: usize, direction: SortDirection);
}

/// A pre-built multi-select combobox.
pub trait MultiSelect {
    /// Selected option values, in selection order.
    fn selected(&self) -> Vec<String>;

    /// Replace the selection.
    fn set_selected(&mut self, values: Vec<String>);

    /// Close the dropdown.
    fn close(&mut self);
}

/// The current document location.
pub trait History {
    /// Full current URL.
    fn href(&self) -> String;

    /// Replace the current history entry's URL without navigating.
    fn replace_url(&mut self, url: &str);
}

impl<T: Markers + ?Sized> Markers for Rc<RefCell<T>> {
    fn has_marker(&self, marker: &str) -> bool {
        self.borrow().has_marker(marker)
    }

    fn set_marker(&mut self, marker: &str) {
        self.borrow_mut().set_marker(marker);
    }
}

impl<T: TableWidget + ?Sized> TableWidget for Rc<RefCell<T>> {
    fn push_row_filter(&mut self, filter: RowFilter) {
        self.borrow_mut().push_row_filter(filter);
    }

    fn row_filter_state(&self) -> Option<SharedFilterState> {
        self.borrow().row_filter_state()
    }

    fn set_row_filter_state(&mut self, state: SharedFilterState) {
        self.borrow_mut().set_row_filter_state(state);
    }

    fn draw(&mut self) {
        self.borrow_mut().draw();
    }

    fn headers(&self) -> Vec<SortHeader> {
        self.borrow().headers()
    }

    fn order(&self) -> Vec<(usize, SortDirection)> {
        self.borrow().order()
    }

    fn set_order(&mut self, column: usize, direction: SortDirection) {
        self.borrow_mut().set_order(column, direction);
    }
}

impl<T: MultiSelect + ?Sized> MultiSelect for Rc<RefCell<T>> {
    fn selected(&self) -> Vec<String> {
        self.borrow().selected()
    }

    fn set_selected(&mut self, values: Vec<String>) {
        self.borrow_mut().set_selected(values);
    }

    fn close(&mut self) {
        self.borrow_mut().close();
    }
}

impl<T: History + ?Sized> History for Rc<RefCell<T>> {
    fn href(&self) -> String {
        self.borrow().href()
    }

    fn replace_url(&mut self, url: &str) {
        self.borrow_mut().replace_url(url);
    }
}

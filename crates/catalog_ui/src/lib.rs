//! # Catalog UI
//!
//! Client-side search engine for the unit catalog.
//!
//! The table, the multi-select combobox and the browser history are
//! external widgets reached only through the traits in [`widgets`]. This
//! crate keeps them consistent:
//!
//! - [`filter`] - Filter state and the conjunctive row predicate
//! - [`combobox`] - Combobox and free-text input to filter state
//! - [`sort`] - Table sort to and from the `sort` URL parameter
//! - [`page`] - Marker-guarded page initialisation and readiness polling
//!
//! Everything runs on a single thread; shared handles are `Rc<RefCell<_>>`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod combobox;
pub mod error;
pub mod filter;
pub mod page;
pub mod query;
pub mod rows;
pub mod sort;
pub mod widgets;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::combobox::{ComboboxBridge, Key};
    pub use crate::error::{Result, UiError};
    pub use crate::filter::{install_row_filter, row_matches, FilterState, SharedFilterState};
    pub use crate::page::{init_page, wait_for_table, Page, PageSession};
    pub use crate::rows::RowAttributes;
    pub use crate::sort::{SortDirection, SortHeader, SortState, SortSync};
    pub use crate::widgets::{History, Markers, MultiSelect, RowFilter, TableWidget};
}

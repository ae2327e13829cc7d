//! In-memory stand-ins for the external widgets.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use catalog_core::facets::FacetOption;
use catalog_ui::filter::SharedFilterState;
use catalog_ui::page::Page;
use catalog_ui::rows::RowAttributes;
use catalog_ui::sort::{SortDirection, SortHeader};
use catalog_ui::widgets::{History, Markers, MultiSelect, RowFilter, TableWidget};

/// A DOM node carrying marker attributes.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    markers: BTreeSet<String>,
}

impl Markers for FakeNode {
    fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    fn set_marker(&mut self, marker: &str) {
        self.markers.insert(marker.to_string());
    }
}

/// Table that filters rows through its registered predicates on draw.
#[derive(Default)]
pub struct FakeTable {
    headers: Vec<SortHeader>,
    rows: Vec<RowAttributes>,
    filters: Vec<RowFilter>,
    filter_state: Option<SharedFilterState>,
    visible: Vec<usize>,
    order: Vec<(usize, SortDirection)>,
    node: FakeNode,
    /// Number of draws.
    pub draws: usize,
    /// Number of predicate calls across all draws.
    pub evaluations: usize,
}

impl FakeTable {
    /// Create a table showing every row.
    #[must_use]
    pub fn new(headers: Vec<SortHeader>, rows: Vec<RowAttributes>) -> Self {
        let visible = (0..rows.len()).collect();
        Self {
            headers,
            rows,
            visible,
            ..Self::default()
        }
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Number of registered predicates.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Indices of visible rows.
    #[must_use]
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Search text of visible rows.
    #[must_use]
    pub fn visible_names(&self) -> Vec<String> {
        self.visible
            .iter()
            .map(|&i| self.rows[i].search_text.clone())
            .collect()
    }

    /// Simulate a header click: sort by `column` (or clear with `None`)
    /// without going through the programmatic API.
    pub fn user_sort(&mut self, order: Option<(usize, SortDirection)>) {
        self.order = order.into_iter().collect();
    }

    /// Simulate a multi-column sort.
    pub fn user_multi_sort(&mut self, order: Vec<(usize, SortDirection)>) {
        self.order = order;
    }
}

impl Markers for FakeTable {
    fn has_marker(&self, marker: &str) -> bool {
        self.node.has_marker(marker)
    }

    fn set_marker(&mut self, marker: &str) {
        self.node.set_marker(marker);
    }
}

impl TableWidget for FakeTable {
    fn push_row_filter(&mut self, filter: RowFilter) {
        self.filters.push(filter);
    }

    fn row_filter_state(&self) -> Option<SharedFilterState> {
        self.filter_state.clone()
    }

    fn set_row_filter_state(&mut self, state: SharedFilterState) {
        self.filter_state = Some(state);
    }

    fn draw(&mut self) {
        let mut evaluations = 0;
        let filters = &self.filters;
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                filters.iter().all(|f| {
                    evaluations += 1;
                    f(row)
                })
            })
            .map(|(i, _)| i)
            .collect();
        self.evaluations += evaluations;
        self.draws += 1;
    }

    fn headers(&self) -> Vec<SortHeader> {
        self.headers.clone()
    }

    fn order(&self) -> Vec<(usize, SortDirection)> {
        self.order.clone()
    }

    fn set_order(&mut self, column: usize, direction: SortDirection) {
        self.order = vec![(column, direction)];
        self.draw();
    }
}

/// Multi-select that records its selection.
#[derive(Debug, Clone, Default)]
pub struct FakeSelect {
    /// Options the widget was rendered with.
    pub options: Vec<FacetOption>,
    /// Selected values, in selection order.
    pub selection: Vec<String>,
    /// Whether the dropdown is open.
    pub open: bool,
    /// Number of `set_selected` calls.
    pub writes: usize,
}

impl FakeSelect {
    /// Simulate the user picking `value` in the dropdown.
    pub fn user_select(&mut self, value: &str) {
        self.selection.push(value.to_string());
    }

    /// Simulate the user removing `value`.
    pub fn user_deselect(&mut self, value: &str) {
        self.selection.retain(|v| v != value);
    }
}

impl MultiSelect for FakeSelect {
    fn selected(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn set_selected(&mut self, values: Vec<String>) {
        self.selection = values;
        self.writes += 1;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// History recording URL replacements.
#[derive(Debug, Clone, Default)]
pub struct FakeHistory {
    /// Current URL.
    pub url: String,
    /// Number of `replace_url` calls.
    pub replacements: usize,
}

impl FakeHistory {
    /// History positioned at `url`.
    #[must_use]
    pub fn at(url: &str) -> Self {
        Self {
            url: url.to_string(),
            replacements: 0,
        }
    }
}

impl History for FakeHistory {
    fn href(&self) -> String {
        self.url.clone()
    }

    fn replace_url(&mut self, url: &str) {
        self.url = url.to_string();
        self.replacements += 1;
    }
}

/// A catalog page whose table becomes ready after a number of polls.
pub struct FakePage {
    /// Shared table handle.
    pub table: Rc<RefCell<FakeTable>>,
    /// Whether the table wrapper exists.
    pub has_table: bool,
    /// Polls answered with "not ready" before the table is ready.
    pub ready_after: u32,
    /// Polls made so far.
    pub polls: u32,
    /// Search mount target.
    pub mount: Option<FakeNode>,
    /// Embedded options script.
    pub options_json: Option<String>,
    /// Most recently created select handle.
    pub select: Option<Rc<RefCell<FakeSelect>>>,
    /// History handle.
    pub history: FakeHistory,
}

impl FakePage {
    /// Page with a ready table, a mount target and `options_json`.
    #[must_use]
    pub fn new(table: FakeTable, options_json: &str, url: &str) -> Self {
        Self {
            table: table.shared(),
            has_table: true,
            ready_after: 0,
            polls: 0,
            mount: Some(FakeNode::default()),
            options_json: Some(options_json.to_string()),
            select: None,
            history: FakeHistory::at(url),
        }
    }
}

impl Page for FakePage {
    type Select = Rc<RefCell<FakeSelect>>;
    type Table = Rc<RefCell<FakeTable>>;
    type MountTarget = FakeNode;
    type History = FakeHistory;

    fn has_units_table(&self) -> bool {
        self.has_table
    }

    fn ready_table(&mut self) -> Option<Self::Table> {
        self.polls += 1;
        if self.polls > self.ready_after {
            Some(Rc::clone(&self.table))
        } else {
            None
        }
    }

    fn mount_target(&mut self) -> Option<&mut Self::MountTarget> {
        self.mount.as_mut()
    }

    fn options_script(&self) -> Option<String> {
        self.options_json.clone()
    }

    fn create_select(&mut self, options: &[FacetOption]) -> Self::Select {
        let select = Rc::new(RefCell::new(FakeSelect {
            options: options.to_vec(),
            ..FakeSelect::default()
        }));
        self.select = Some(Rc::clone(&select));
        select
    }

    fn history(&mut self) -> &mut Self::History {
        &mut self.history
    }
}

//! One-time page initialisation.
//!
//! Runs on first load and again on every client-side navigation. Each step
//! is guarded by a marker on the node it binds to, so a second run against
//! the same DOM does nothing.

use catalog_core::config::{CatalogConfig, PollConfig};
use catalog_core::facets::FacetOption;

use crate::combobox::ComboboxBridge;
use crate::error::{Result, UiError};
use crate::sort::SortSync;
use crate::widgets::{History, Markers, MultiSelect, TableWidget, MOUNTED_MARKER};

/// Everything page initialisation needs from the document.
pub trait Page {
    /// Multi-select widget handle.
    type Select: MultiSelect;
    /// Table widget handle. Cloning yields another handle to the same table.
    type Table: TableWidget + Clone;
    /// Mount point of the unit search.
    type MountTarget: Markers;
    /// Browser history handle.
    type History: History;

    /// Whether the page contains the units table at all.
    fn has_units_table(&self) -> bool;

    /// The table widget, once it has finished initialising.
    fn ready_table(&mut self) -> Option<Self::Table>;

    /// Mount target of the unit search, if present.
    fn mount_target(&mut self) -> Option<&mut Self::MountTarget>;

    /// Text of the embedded search-options script, if present.
    fn options_script(&self) -> Option<String>;

    /// Render the multi-select widget with `options`.
    fn create_select(&mut self, options: &[FacetOption]) -> Self::Select;

    /// History handle.
    fn history(&mut self) -> &mut Self::History;
}

/// Bridges created by one initialisation run.
pub struct PageSession<P: Page> {
    /// Search bridge, when this run mounted the unit search.
    pub search: Option<ComboboxBridge<P::Select, P::Table>>,
    /// Sort sync, when this run bound it.
    pub sort: Option<SortSync>,
    /// Table handle the sort sync is bound to.
    pub table: Option<P::Table>,
}

impl<P: Page> PageSession<P> {
    /// Whether this run bound nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.search.is_none() && self.sort.is_none()
    }

    /// Forward the table's sort-changed notification.
    pub fn on_order_changed(&self, history: &mut P::History) {
        if let (Some(sort), Some(table)) = (&self.sort, &self.table) {
            sort.on_order_changed(table, history);
        }
    }
}

/// Let pending widget DOM work settle before touching it.
pub async fn next_frame() {
    tokio::task::yield_now().await;
}

/// Poll `page` until its table widget is ready.
///
/// # Errors
///
/// Returns [`UiError::WidgetNotReady`] once `poll.max_attempts` is exhausted.
/// With no attempt bound this only returns when the table is ready.
pub async fn wait_for_table<P: Page>(page: &mut P, poll: &PollConfig) -> Result<P::Table> {
    let mut attempts: u32 = 0;
    loop {
        if let Some(table) = page.ready_table() {
            tracing::debug!(attempts, "table widget ready");
            return Ok(table);
        }
        attempts = attempts.saturating_add(1);
        if poll.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(UiError::WidgetNotReady { attempts });
        }
        tokio::time::sleep(poll.interval()).await;
    }
}

/// Parse the embedded search-options JSON.
///
/// # Errors
///
/// Returns [`UiError::OptionsParse`] if the text is not a JSON option list.
pub fn parse_options(text: &str) -> Result<Vec<FacetOption>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(text)?)
}

/// Mount the unit search once.
///
/// Returns `None` when there is no mount target or it is already mounted.
/// Unparseable options are logged and replaced by an empty list.
pub fn mount_unit_search<P: Page>(
    page: &mut P,
    table: P::Table,
) -> Option<ComboboxBridge<P::Select, P::Table>> {
    let script = page.options_script()?;
    let target = page.mount_target()?;
    if target.has_marker(MOUNTED_MARKER) {
        return None;
    }
    target.set_marker(MOUNTED_MARKER);

    let options = parse_options(&script).unwrap_or_else(|e| {
        tracing::error!("{e}");
        Vec::new()
    });
    let select = page.create_select(&options);
    tracing::debug!(options = options.len(), "mounted unit search");
    Some(ComboboxBridge::new(select, table, options))
}

/// Initialise the catalog page.
///
/// Defers one frame, waits for the table widget, mounts the search and
/// binds sort sync. Safe to call repeatedly.
///
/// # Errors
///
/// Returns [`UiError::WidgetNotReady`] if a poll bound is configured and
/// the table never initialises.
pub async fn init_page<P: Page>(page: &mut P, config: &CatalogConfig) -> Result<PageSession<P>> {
    next_frame().await;

    if !page.has_units_table() {
        return Ok(PageSession {
            search: None,
            sort: None,
            table: None,
        });
    }

    let table = wait_for_table(page, &config.table_poll).await?;
    let search = mount_unit_search(page, table.clone());

    let mut sort_table = table;
    let sort = SortSync::bind(&mut sort_table, &*page.history(), &config.sort_param);

    Ok(PageSession {
        search,
        sort,
        table: Some(sort_table),
    })
}

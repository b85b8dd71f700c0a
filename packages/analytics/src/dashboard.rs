//! Memoized wiring of the pipeline stages behind one dashboard view.
//!
//! [`Dashboard`] owns the loaded record sequence plus the user's current
//! query and page, and recomputes a stage only when that stage's inputs
//! changed. Each cached stage is keyed on exactly the inputs it reads:
//!
//! | Stage | Key |
//! |---|---|
//! | filtered + sorted table | record version, search term, state filter, sort |
//! | race stats | record version, state filter |
//! | viewport | same key as the table |
//!
//! Pages are cheap and always recomputed.

use std::sync::Arc;

use chrono::NaiveDate;
use incident_map_analytics_models::{
    AggregatedStat, DEFAULT_PAGE_SIZE, PageWindow, SortKey, SortSpec, page_count,
};
use incident_map_export::{export_default_csv, export_filename};
use incident_map_geography_models::{StateFilter, Viewport};
use incident_map_incident_models::IncidentRecord;
use incident_map_spatial::compute_viewport;

use crate::aggregate::aggregate_by_race;
use crate::filter::filter;
use crate::paginate::page_slice;
use crate::sort::sort_in_place;

/// The user-controlled inputs of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Free-text search over name and city.
    pub search_term: String,
    /// Categorical state filter.
    pub state: StateFilter,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableKey {
    version: u64,
    query: DashboardQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatsKey {
    version: u64,
    state: StateFilter,
}

/// A cached value together with the inputs it was computed from.
#[derive(Debug)]
struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    const fn new() -> Self {
        Self { entry: None }
    }

    fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = &self.entry
            && *cached_key == key
        {
            return value.clone();
        }
        let value = compute();
        self.entry = Some((key, value.clone()));
        value
    }

    fn clear(&mut self) {
        self.entry = None;
    }
}

/// One rendered table page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    /// Position of this page in the filtered sequence.
    pub window: PageWindow,
    /// Rows on this page.
    pub items: Vec<IncidentRecord>,
}

/// The dashboard's state plus memoized derived views.
#[derive(Debug)]
pub struct Dashboard {
    records: Arc<[IncidentRecord]>,
    version: u64,
    query: DashboardQuery,
    page_index: usize,
    page_size: usize,
    table: Memo<TableKey, Arc<[IncidentRecord]>>,
    stats: Memo<StatsKey, Arc<[AggregatedStat]>>,
    viewport: Memo<TableKey, Viewport>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Dashboard {
    /// Creates an empty dashboard showing `page_size` rows per page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Arc::from(Vec::new()),
            version: 0,
            query: DashboardQuery::default(),
            page_index: 1,
            page_size,
            table: Memo::new(),
            stats: Memo::new(),
            viewport: Memo::new(),
        }
    }

    /// Replaces the loaded record sequence.
    ///
    /// Every cached stage is invalidated. The page index is kept and
    /// clamped the next time a page is requested.
    pub fn load(&mut self, records: impl Into<Arc<[IncidentRecord]>>) {
        self.records = records.into();
        self.version = self.version.wrapping_add(1);
        self.table.clear();
        self.stats.clear();
        self.viewport.clear();
        log::debug!(
            "Loaded {} records (version {})",
            self.records.len(),
            self.version
        );
    }

    /// The loaded record sequence.
    #[must_use]
    pub fn records(&self) -> &Arc<[IncidentRecord]> {
        &self.records
    }

    /// Monotonic counter bumped on every [`Self::load`].
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Current search term, state filter and sort.
    #[must_use]
    pub const fn query(&self) -> &DashboardQuery {
        &self.query
    }

    /// Rows shown per table page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the free-text search term and returns to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.page_index = 1;
    }

    /// Sets the state filter and returns to the first page.
    pub fn set_state_filter(&mut self, state: StateFilter) {
        self.query.state = state;
        self.page_index = 1;
    }

    /// Toggles the sort on `key` and returns to the first page.
    ///
    /// Returns the sort that is now active.
    pub fn request_sort(&mut self, key: SortKey) -> SortSpec {
        let spec = SortSpec::toggle(self.query.sort, key);
        self.query.sort = Some(spec);
        self.page_index = 1;
        spec
    }

    /// Replaces the sort outright and returns to the first page.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.query.sort = sort;
        self.page_index = 1;
    }

    /// Removes the active sort, restoring the loaded order.
    pub fn clear_sort(&mut self) {
        self.set_sort(None);
    }

    /// Changes the rows per page and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page_index = 1;
    }

    /// Jumps to 1-based `page_index`; clamped when the page is built.
    pub const fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Advances one page, stopping at the last.
    pub fn next_page(&mut self) {
        let window = self.window();
        if window.has_next() {
            self.page_index = window.page_index + 1;
        }
    }

    /// Goes back one page, stopping at the first.
    pub fn previous_page(&mut self) {
        let window = self.window();
        if window.has_previous() {
            self.page_index = window.page_index - 1;
        }
    }

    fn table_key(&self) -> TableKey {
        TableKey {
            version: self.version,
            query: self.query.clone(),
        }
    }

    /// Records matching the current query, in display order.
    pub fn filtered_sorted(&mut self) -> Arc<[IncidentRecord]> {
        let key = self.table_key();
        let Self {
            records,
            query,
            table,
            ..
        } = self;
        table.get_or_compute(key, || {
            let mut rows = filter(records, &query.search_term, &query.state);
            sort_in_place(&mut rows, query.sort);
            log::trace!("Recomputed table: {} of {} records", rows.len(), records.len());
            Arc::from(rows)
        })
    }

    /// Number of records matching the current query.
    pub fn result_count(&mut self) -> usize {
        self.filtered_sorted().len()
    }

    /// Race distribution of the loaded records under the state filter.
    ///
    /// The free-text search narrows the table but not this distribution.
    pub fn stats(&mut self) -> Arc<[AggregatedStat]> {
        let key = StatsKey {
            version: self.version,
            state: self.query.state.clone(),
        };
        let Self {
            records,
            query,
            stats,
            ..
        } = self;
        stats.get_or_compute(key, || match query.state {
            StateFilter::All => Arc::from(aggregate_by_race(records)),
            StateFilter::State(_) => {
                Arc::from(aggregate_by_race(&filter(records, "", &query.state)))
            }
        })
    }

    /// Map viewport for the records matching the current query.
    pub fn viewport(&mut self) -> Viewport {
        let key = self.table_key();
        let rows = self.filtered_sorted();
        self.viewport.get_or_compute(key, || compute_viewport(&rows))
    }

    fn window(&mut self) -> PageWindow {
        let total = self.filtered_sorted().len();
        PageWindow::new(self.page_index, self.page_size, total)
    }

    /// The current table page, with the page index clamped into range.
    pub fn page(&mut self) -> DashboardPage {
        let rows = self.filtered_sorted();
        let window = PageWindow::new(self.page_index, self.page_size, rows.len());
        self.page_index = window.page_index;
        DashboardPage {
            window,
            items: page_slice(&rows, window.page_index, window.page_size).to_vec(),
        }
    }

    /// Total pages for the current query.
    pub fn page_count(&mut self) -> usize {
        page_count(self.filtered_sorted().len(), self.page_size)
    }

    /// CSV document for every record matching the current query.
    pub fn export_csv(&mut self) -> String {
        let rows = self.filtered_sorted();
        export_default_csv(&rows, &self.query.state)
    }

    /// Download filename for [`Self::export_csv`] on `date`.
    #[must_use]
    pub fn export_filename(&self, date: NaiveDate) -> String {
        export_filename(&self.query.state, date)
    }
}

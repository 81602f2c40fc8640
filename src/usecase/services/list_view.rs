use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::listing::{
    DateRange, FilterCriteria, ListSpec, PageWindowEntry, PaginationState, SortState,
};
use crate::domain::entities::record::{FilterValue, Record};
use crate::domain::list::comparator::sort_indices;
use crate::domain::list::page_window::page_window;
use crate::domain::list::predicate::filter_indices;
use crate::usecase::ports::source::{FetchPage, FetchParams, PageRequest, SourceError};

/// Where filtering and pagination happen for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PagingMode {
    /// Fetch everything once; filter, sort and paginate in memory.
    #[default]
    Local,
    /// The source filters and paginates and reports the filtered total; the
    /// controller only re-applies search and sort to the returned page.
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Handed out by [`ListViewController::begin_refresh`]. Only the ticket of
/// the most recent request may apply its batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTicket {
    generation: u64,
    pub params: FetchParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a, R> {
    pub rows: Vec<&'a R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub window: Vec<PageWindowEntry>,
}

/// Filter, sort and pagination state of one rendered list.
///
/// Records are owned as a batch and never mutated; `order` holds the indices
/// of the visible records in display order.
#[derive(Debug, Clone)]
pub struct ListViewController<R> {
    spec: ListSpec,
    mode: PagingMode,
    records: Vec<R>,
    order: Vec<usize>,
    criteria: FilterCriteria,
    sort: Option<SortState>,
    pagination: PaginationState,
    generation: u64,
    load_state: LoadState,
    needs_refresh: bool,
}

impl<R: Record> ListViewController<R> {
    pub fn new(spec: ListSpec, mode: PagingMode, page_size: usize) -> Self {
        let sort = spec.default_sort.clone();
        Self {
            spec,
            mode,
            records: Vec::new(),
            order: Vec::new(),
            criteria: FilterCriteria::default(),
            sort,
            pagination: PaginationState::new(page_size),
            generation: 0,
            load_state: LoadState::Idle,
            needs_refresh: true,
        }
    }

    pub fn spec(&self) -> &ListSpec {
        &self.spec
    }

    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Server mode only: the loaded page no longer matches the current
    /// filter, sort or page.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.filters_changed();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.filters_changed();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.criteria.date_range = range;
        self.filters_changed();
    }

    pub fn set_equality(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.criteria.set_equality(field, value);
        self.filters_changed();
    }

    pub fn clear_equality(&mut self, field: &str) {
        self.criteria.clear_equality(field);
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        debug!(section = self.spec.section, criteria = ?self.criteria, "filters changed");
        self.pagination.reset();
        self.mark_stale();
        self.recompute();
    }

    /// Header click. Unknown keys are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if !self.spec.is_sortable(key) {
            debug!(section = self.spec.section, key, "ignoring sort on unsortable key");
            return false;
        }
        let next = SortState::toggled(self.sort.as_ref(), key);
        self.set_sort(next);
        true
    }

    /// Re-sorts the filtered set. The current page is kept.
    pub fn set_sort(&mut self, sort: SortState) {
        debug!(section = self.spec.section, key = %sort.key, direction = ?sort.direction, "sort changed");
        self.sort = Some(sort);
        self.mark_stale();
        self.resort();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
        debug!(section = self.spec.section, page_size = self.pagination.page_size(), "page size changed");
        self.mark_stale();
    }

    /// Clamps into `[1, total_pages]`. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let changed = self.pagination.go_to(page);
        self.page_moved(changed)
    }

    pub fn first_page(&mut self) -> bool {
        let changed = self.pagination.first();
        self.page_moved(changed)
    }

    pub fn previous_page(&mut self) -> bool {
        let changed = self.pagination.previous();
        self.page_moved(changed)
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.next();
        self.page_moved(changed)
    }

    pub fn last_page(&mut self) -> bool {
        let changed = self.pagination.last();
        self.page_moved(changed)
    }

    fn page_moved(&mut self, changed: bool) -> bool {
        if changed {
            debug!(section = self.spec.section, page = self.pagination.current_page(), "page changed");
            self.mark_stale();
        }
        changed
    }

    fn mark_stale(&mut self) {
        if self.mode == PagingMode::Server {
            self.needs_refresh = true;
        }
    }

    /// Starts a refresh. Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        RefreshTicket {
            generation: self.generation,
            params: self.fetch_params(),
        }
    }

    pub fn fetch_params(&self) -> FetchParams {
        match self.mode {
            PagingMode::Local => FetchParams::all(),
            PagingMode::Server => FetchParams {
                criteria: self.criteria.clone(),
                sort: self.sort.clone(),
                page: Some(PageRequest {
                    page: self.pagination.current_page(),
                    page_size: self.pagination.page_size(),
                }),
            },
        }
    }

    /// Applies the batch for `ticket` unless a newer refresh was started in
    /// the meantime. A failed load keeps the previous rows.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<FetchPage<R>, SourceError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            warn!(
                section = self.spec.section,
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale response"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(batch) => {
                self.needs_refresh = false;
                self.replace_batch(batch);
                self.load_state = LoadState::Ready;
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(section = self.spec.section, error = %err, "load failed");
                self.load_state = LoadState::Failed(err.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    /// Swaps in a new batch, reapplying filters and sort. The current page is
    /// kept when still in range.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.replace_batch(FetchPage::complete(records));
    }

    fn replace_batch(&mut self, batch: FetchPage<R>) {
        let requested_page = self.pagination.current_page();
        self.records = batch.records;
        if self.mode == PagingMode::Server {
            self.pagination.set_total_items(batch.total);
            // The source answered for a page past the new end.
            if self.pagination.current_page() != requested_page {
                self.needs_refresh = true;
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.order = filter_indices(&self.records, &self.criteria, &self.spec);
        self.resort();
        if self.mode == PagingMode::Local {
            self.pagination.set_total_items(self.order.len());
        }
    }

    fn resort(&mut self) {
        if let Some(sort) = &self.sort {
            sort_indices(&self.records, &mut self.order, sort, self.spec.tie_break);
        }
    }

    pub fn total_items(&self) -> usize {
        self.pagination.total_items()
    }

    pub fn view(&self) -> ListView<'_, R> {
        let rows = match self.mode {
            PagingMode::Local => self
                .order
                .iter()
                .skip(self.pagination.offset())
                .take(self.pagination.page_size())
                .map(|&idx| &self.records[idx])
                .collect(),
            PagingMode::Server => self.order.iter().map(|&idx| &self.records[idx]).collect(),
        };
        ListView {
            rows,
            current_page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
            total_items: self.pagination.total_items(),
            has_previous: self.pagination.has_previous(),
            has_next: self.pagination.has_next(),
            window: page_window(
                self.pagination.total_pages(),
                self.pagination.current_page(),
            ),
        }
    }

    /// Every filtered record in display order, ignoring pagination. In server
    /// mode this is only the loaded page.
    pub fn export_rows(&self) -> Vec<&R> {
        self.order.iter().map(|&idx| &self.records[idx]).collect()
    }
}

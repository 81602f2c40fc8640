use chrono::NaiveDate;

use crate::domain::entities::record::FilterValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Header click: the active key flips direction, any other key starts
    /// ascending.
    pub fn toggled(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(state) if state.key == key => SortState::new(key, state.direction.flipped()),
            _ => SortState::new(key, SortDirection::Asc),
        }
    }
}

/// Inclusive calendar-day range. An absent bound imposes no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Canonical `YYYY-MM-DD` strings; empty for an absent bound.
    pub fn to_query_pair(&self) -> (String, String) {
        let render = |date: Option<NaiveDate>| {
            date.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        (render(self.from), render(self.to))
    }
}

/// Parses `YYYY-MM-DD`, also accepting the date part of an ISO timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub equality: Vec<(String, FilterValue)>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_equality(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set_equality(field, value);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Replaces any existing filter on the same field.
    pub fn set_equality(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        let value = value.into();
        match self.equality.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.equality.push((field, value)),
        }
    }

    pub fn clear_equality(&mut self, field: &str) {
        self.equality.retain(|(name, _)| name != field);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Keeps the current page when still in range, otherwise clamps it.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Returns whether the page actually changed.
    pub fn go_to(&mut self, requested: i64) -> bool {
        let last = self.total_pages() as i64;
        let target = requested.clamp(1, last) as usize;
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn previous(&mut self) -> bool {
        self.go_to(self.current_page as i64 - 1)
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page as i64 + 1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWindowEntry {
    Page(usize),
    Ellipsis,
}

/// Per-list configuration shared by the predicate, comparator and controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    pub section: &'static str,
    pub searchable: Vec<&'static str>,
    pub sortable: Vec<&'static str>,
    pub tie_break: &'static str,
    pub date_field: Option<&'static str>,
    pub default_sort: Option<SortState>,
}

impl ListSpec {
    pub fn movements() -> Self {
        Self {
            section: "movimientos",
            searchable: vec!["concepto", "categoria"],
            sortable: vec!["fecha", "concepto", "categoria", "debe", "haber", "saldo"],
            tie_break: "created_at",
            date_field: Some("fecha"),
            default_sort: Some(SortState::new("fecha", SortDirection::Desc)),
        }
    }

    pub fn expenses() -> Self {
        Self {
            section: "gastos",
            searchable: vec!["descripcion", "categoria"],
            sortable: vec!["fecha", "descripcion", "categoria", "monto"],
            tie_break: "created_at",
            date_field: Some("fecha"),
            default_sort: Some(SortState::new("fecha", SortDirection::Desc)),
        }
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.sortable.iter().any(|candidate| *candidate == key)
    }
}

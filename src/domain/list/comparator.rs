use std::cmp::Ordering;

use crate::domain::entities::listing::{SortDirection, SortState};
use crate::domain::entities::record::{compare_values, Record};

/// Orders by the sort key, then by `tie_break` ascending. Only the primary
/// comparison follows `sort.direction`.
pub fn compare_records<R: Record>(a: &R, b: &R, sort: &SortState, tie_break: &str) -> Ordering {
    let primary = compare_values(&a.field(&sort.key), &b.field(&sort.key));
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| compare_values(&a.field(tie_break), &b.field(tie_break)))
}

/// Stable sort of record indices. Records equal on both keys keep their
/// relative order.
pub fn sort_indices<R: Record>(
    records: &[R],
    indices: &mut [usize],
    sort: &SortState,
    tie_break: &str,
) {
    indices.sort_by(|&a, &b| compare_records(&records[a], &records[b], sort, tie_break));
}

pub fn sort_records<R: Record>(records: &mut [R], sort: &SortState, tie_break: &str) {
    records.sort_by(|a, b| compare_records(a, b, sort, tie_break));
}

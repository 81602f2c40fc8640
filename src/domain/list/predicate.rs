use crate::domain::entities::listing::{FilterCriteria, ListSpec};
use crate::domain::entities::record::{FieldValue, Record};
use crate::domain::list::text::fold;

/// Builds the visibility test for one list. All criteria are ANDed.
///
/// The search query is folded once up front; each record field is folded on
/// demand. A record with no date passes only while the range is unbounded.
pub fn build_predicate<'a, R: Record>(
    criteria: &'a FilterCriteria,
    spec: &'a ListSpec,
) -> impl Fn(&R) -> bool + 'a {
    let query = fold(criteria.search_text.trim());

    move |record: &R| {
        if !query.is_empty() {
            let hit = spec.searchable.iter().any(|name| match record.field(name) {
                FieldValue::Missing => false,
                FieldValue::Text(text) => fold(&text).contains(&query),
                other => fold(&other.display()).contains(&query),
            });
            if !hit {
                return false;
            }
        }

        let equal = criteria
            .equality
            .iter()
            .all(|(name, expected)| expected.matches(&record.field(name)));
        if !equal {
            return false;
        }

        if criteria.date_range.is_unbounded() {
            return true;
        }
        spec.date_field
            .and_then(|name| record.field(name).as_date())
            .is_some_and(|date| criteria.date_range.contains(date))
    }
}

/// Indices of the records that pass, in input order.
pub fn filter_indices<R: Record>(
    records: &[R],
    criteria: &FilterCriteria,
    spec: &ListSpec,
) -> Vec<usize> {
    let visible = build_predicate::<R>(criteria, spec);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| visible(*record))
        .map(|(idx, _)| idx)
        .collect()
}

//! The generic filter/sort/page engine behind every list operation
//!
//! Ties are broken by the model's storage order: sorting is stable over the
//! filtered sequence, which itself preserves insertion order. Two records
//! with equal sort keys therefore keep their report order, in both sort
//! directions, on every call.

use std::cmp::Reverse;

use super::page::{PageSpec, QueryPage};
use super::sort::SortDirection;

/// Filters and pages without sorting; result order is insertion order
pub(crate) fn filter_page<'a, T, M>(items: &'a [T], matches: M, page: &PageSpec) -> QueryPage<&'a T>
where
    M: Fn(&T) -> bool,
{
    let selected: Vec<&T> = items.iter().filter(|&item| matches(item)).collect();
    window(selected, page)
}

/// Filters, sorts by a key, then pages
pub(crate) fn filter_sort_page<'a, T, K, M, S>(
    items: &'a [T],
    matches: M,
    key: S,
    direction: SortDirection,
    page: &PageSpec,
) -> QueryPage<&'a T>
where
    K: Ord,
    M: Fn(&T) -> bool,
    S: Fn(&T) -> K,
{
    let mut selected: Vec<&T> = items.iter().filter(|&item| matches(item)).collect();
    match direction {
        // sort_by_cached_key is stable, so equal keys keep insertion order
        SortDirection::Ascending => selected.sort_by_cached_key(|item| key(item)),
        SortDirection::Descending => selected.sort_by_cached_key(|item| Reverse(key(item))),
    }
    window(selected, page)
}

fn window<T>(selected: Vec<T>, page: &PageSpec) -> QueryPage<T> {
    let total_count = selected.len();
    let items = selected
        .into_iter()
        .skip(page.offset)
        .take(page.limit.unwrap_or(usize::MAX))
        .collect();
    QueryPage { items, total_count }
}

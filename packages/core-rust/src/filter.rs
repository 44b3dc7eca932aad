//! Filter predicate engine.
//!
//! [`matches`] composes one predicate per criteria component with logical
//! AND. Every predicate is permissive when its component is at the default
//! (empty set, zero rating, unset flag), so the default criteria accepts
//! every item. Color and material intentionally match by case-insensitive
//! substring containment rather than exact membership: both are free text
//! on items, while the facet chips offering them are catalog-derived.

use std::collections::BTreeSet;

use crate::catalog::CatalogItem;
use crate::criteria::{FilterCriteria, PriceRange};
use crate::sort::{sort_in_place, SortKey};

/// Whether `item` satisfies `criteria` and the free-text search.
///
/// Missing optional fields never fail the whole item on their own; they
/// only exclude it from predicates that explicitly require the field.
#[must_use]
pub fn matches(item: &CatalogItem, criteria: &FilterCriteria, search_text: &str) -> bool {
    matches_search(item, search_text)
        && matches_exact(&criteria.brands, &item.brand)
        && matches_price(&criteria.price_range, item.price)
        && matches_sizes(&criteria.sizes, &item.sizes)
        && matches_variant(&criteria.conditions, item.condition)
        && matches_exact(&criteria.categories, &item.category)
        && matches_containment(&criteria.colors, &item.color)
        && matches_containment(&criteria.materials, &item.material)
        && matches_variant(&criteria.genders, item.target_gender)
        && matches_variant(&criteria.age_groups, item.age_group)
        && matches_variant(&criteria.seasons, item.season)
        && matches_variant(&criteria.styles, item.style)
        && matches_rating(criteria.rating, item.rating)
        && (!criteria.featured_only || item.featured)
        && (!criteria.in_stock_only || item.in_stock != Some(false))
}

/// Filters the snapshot against `criteria` + `search_text`, then orders the
/// matched subset by `sort_key` (`None` keeps snapshot order).
#[must_use]
pub fn filter_and_sort(
    catalog: &[CatalogItem],
    criteria: &FilterCriteria,
    search_text: &str,
    sort_key: Option<SortKey>,
) -> Vec<CatalogItem> {
    let mut matched: Vec<CatalogItem> = catalog
        .iter()
        .filter(|item| matches(item, criteria, search_text))
        .cloned()
        .collect();
    sort_in_place(&mut matched, sort_key);
    matched
}

/// Case-insensitive substring search over the item's text surface.
fn matches_search(item: &CatalogItem, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    contains(&item.name)
        || contains(&item.brand)
        || contains(&item.description)
        || contains(&item.category)
        || contains(&item.color)
        || item.tags.iter().any(|tag| contains(tag))
}

/// Exact set membership; an empty accepted set matches everything.
fn matches_exact(accepted: &BTreeSet<String>, value: &str) -> bool {
    accepted.is_empty() || accepted.contains(value)
}

/// Typed-enum membership; an absent field only fails when constrained.
fn matches_variant<T: Copy + Ord>(accepted: &BTreeSet<T>, value: Option<T>) -> bool {
    accepted.is_empty() || value.is_some_and(|value| accepted.contains(&value))
}

/// Case-insensitive containment against any accepted term (color/material).
fn matches_containment(accepted: &BTreeSet<String>, value: &str) -> bool {
    if accepted.is_empty() {
        return true;
    }
    if value.is_empty() {
        return false;
    }
    let value = value.to_lowercase();
    accepted.iter().any(|term| value.contains(&term.to_lowercase()))
}

/// At least one of the item's sizes must be accepted.
fn matches_sizes(accepted: &BTreeSet<String>, sizes: &[String]) -> bool {
    accepted.is_empty() || sizes.iter().any(|size| accepted.contains(size))
}

fn matches_price(range: &PriceRange, price: f64) -> bool {
    price >= range.min && (range.is_unbounded_above() || price <= range.max)
}

fn matches_rating(minimum: f64, rating: f64) -> bool {
    minimum <= 0.0 || rating >= minimum
}

//! Sort strategy for the matched result set.
//!
//! All sorts are stable, so items that compare equal keep their catalog
//! order (which the feed supplies newest-first by default). Sorting never
//! mutates the input: callers get a fresh ordering on every snapshot.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Selectable ordering for the displayed result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Creation timestamp descending.
    Newest,
    /// Price descending.
    PriceHigh,
    /// Price ascending.
    PriceLow,
    /// Rating descending.
    Rating,
    /// Featured items first, otherwise stable.
    Featured,
}

impl SortKey {
    /// Parses a UI sort key. Unknown keys yield `None`, which callers treat
    /// as "leave the order unchanged".
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "newest" => Some(Self::Newest),
            "priceHigh" => Some(Self::PriceHigh),
            "priceLow" => Some(Self::PriceLow),
            "rating" => Some(Self::Rating),
            "featured" => Some(Self::Featured),
            _ => None,
        }
    }

    /// Wire name of this key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceHigh => "priceHigh",
            Self::PriceLow => "priceLow",
            Self::Rating => "rating",
            Self::Featured => "featured",
        }
    }
}

/// Returns a new vector holding `items` in the order selected by `key`.
///
/// `None` is the identity ordering. Missing prices and ratings decode to 0
/// upstream, so they sort as 0 here.
#[must_use]
pub fn sort_items(items: &[CatalogItem], key: Option<SortKey>) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();
    sort_in_place(&mut sorted, key);
    sorted
}

/// Stable in-place ordering, shared with [`crate::filter::filter_and_sort`]
/// which already owns its freshly matched vector.
pub(crate) fn sort_in_place(items: &mut [CatalogItem], key: Option<SortKey>) {
    match key {
        None => {}
        Some(SortKey::Newest) => items.sort_by_key(|item| Reverse(item.created_at)),
        Some(SortKey::PriceHigh) => {
            items.sort_by_key(|item| Reverse(OrderedFloat(item.price)));
        }
        Some(SortKey::PriceLow) => items.sort_by_key(|item| OrderedFloat(item.price)),
        Some(SortKey::Rating) => items.sort_by_key(|item| Reverse(OrderedFloat(item.rating))),
        Some(SortKey::Featured) => items.sort_by_key(|item| Reverse(item.featured)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(id: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: id.to_owned(),
            price,
            ..CatalogItem::default()
        }
    }

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn parse_known_and_unknown_keys() {
        assert_eq!(SortKey::parse("newest"), Some(SortKey::Newest));
        assert_eq!(SortKey::parse("priceHigh"), Some(SortKey::PriceHigh));
        assert_eq!(SortKey::parse("alphabetical"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn price_low_sorts_ascending() {
        let items = vec![priced("a", 90.0), priced("b", 30.0), priced("c", 60.0)];
        let sorted = sort_items(&items, Some(SortKey::PriceLow));
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
        // Input untouched.
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn price_high_sorts_descending() {
        let items = vec![priced("a", 90.0), priced("b", 30.0), priced("c", 60.0)];
        let sorted = sort_items(&items, Some(SortKey::PriceHigh));
        assert_eq!(ids(&sorted), vec!["a", "c", "b"]);
    }

    #[test]
    fn no_key_is_identity() {
        let items = vec![priced("a", 90.0), priced("b", 30.0)];
        let sorted = sort_items(&items, None);
        assert_eq!(ids(&sorted), vec!["a", "b"]);
    }

    #[test]
    fn newest_sorts_by_created_at_descending_with_stable_ties() {
        let mut older = priced("older", 0.0);
        older.created_at = 1_000;
        let mut tie_first = priced("tie-first", 0.0);
        tie_first.created_at = 2_000;
        let mut tie_second = priced("tie-second", 0.0);
        tie_second.created_at = 2_000;

        let items = vec![older, tie_first, tie_second];
        let sorted = sort_items(&items, Some(SortKey::Newest));
        assert_eq!(ids(&sorted), vec!["tie-first", "tie-second", "older"]);
    }

    #[test]
    fn rating_sorts_descending_with_missing_as_zero() {
        let mut rated = priced("rated", 0.0);
        rated.rating = 4.5;
        let unrated = priced("unrated", 0.0);

        let sorted = sort_items(&[unrated, rated], Some(SortKey::Rating));
        assert_eq!(ids(&sorted), vec!["rated", "unrated"]);
    }

    #[test]
    fn featured_floats_featured_items_keeping_relative_order() {
        let plain_a = priced("plain-a", 0.0);
        let mut starred = priced("starred", 0.0);
        starred.featured = true;
        let plain_b = priced("plain-b", 0.0);

        let sorted = sort_items(&[plain_a, starred, plain_b], Some(SortKey::Featured));
        assert_eq!(ids(&sorted), vec!["starred", "plain-a", "plain-b"]);
    }
}

//! Facet extraction over a catalog snapshot.
//!
//! Derives, for each filterable field, the sorted set of distinct values
//! observed in the current snapshot. The result feeds the filter UI's
//! option chips, so values appear exactly as they will be matched: raw
//! strings for free-text fields, wire labels for enum fields.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::CatalogItem;

/// Distinct observed values per filterable field, each sorted ascending.
///
/// An empty catalog produces empty vectors on every field, never an absent
/// map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetMap {
    pub brands: Vec<String>,
    /// Flattened across every item's size list.
    pub sizes: Vec<String>,
    pub conditions: Vec<String>,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub genders: Vec<String>,
    pub age_groups: Vec<String>,
    pub seasons: Vec<String>,
    pub styles: Vec<String>,
}

/// Collects the distinct non-empty values of every filterable field.
///
/// Total over any snapshot: an item with absent or empty fields simply
/// contributes nothing to those facets. Blank values are never represented
/// as an empty chip.
#[must_use]
pub fn extract_facets(catalog: &[CatalogItem]) -> FacetMap {
    let mut brands = BTreeSet::new();
    let mut sizes = BTreeSet::new();
    let mut conditions = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut colors = BTreeSet::new();
    let mut materials = BTreeSet::new();
    let mut genders = BTreeSet::new();
    let mut age_groups = BTreeSet::new();
    let mut seasons = BTreeSet::new();
    let mut styles = BTreeSet::new();

    for item in catalog {
        insert_non_empty(&mut brands, &item.brand);
        for size in &item.sizes {
            insert_non_empty(&mut sizes, size);
        }
        insert_non_empty(&mut categories, &item.category);
        insert_non_empty(&mut colors, &item.color);
        insert_non_empty(&mut materials, &item.material);
        if let Some(condition) = item.condition {
            conditions.insert(condition.as_str().to_owned());
        }
        if let Some(gender) = item.target_gender {
            genders.insert(gender.as_str().to_owned());
        }
        if let Some(age_group) = item.age_group {
            age_groups.insert(age_group.as_str().to_owned());
        }
        if let Some(season) = item.season {
            seasons.insert(season.as_str().to_owned());
        }
        if let Some(style) = item.style {
            styles.insert(style.as_str().to_owned());
        }
    }

    FacetMap {
        brands: brands.into_iter().collect(),
        sizes: sizes.into_iter().collect(),
        conditions: conditions.into_iter().collect(),
        categories: categories.into_iter().collect(),
        colors: colors.into_iter().collect(),
        materials: materials.into_iter().collect(),
        genders: genders.into_iter().collect(),
        age_groups: age_groups.into_iter().collect(),
        seasons: seasons.into_iter().collect(),
        styles: styles.into_iter().collect(),
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() {
        set.insert(value.to_owned());
    }
}

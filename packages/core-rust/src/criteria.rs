//! Filter criteria values and discovery-fragment merging.
//!
//! [`FilterCriteria`] is the complete set of active filter constraints held
//! by the filter UI. It is a plain value: screens hold the current value and
//! ask for the next one via [`FilterCriteria::merged`], so no two owners
//! ever alias the same live set. An empty set-valued field means "no
//! constraint" (match everything), never "match nothing".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{AgeGroup, Condition, Season, Style, TargetGender};

/// Upper price bound that means "no upper constraint".
pub const PRICE_CEILING: f64 = 2000.0;

/// Inclusive price window. `max` at [`PRICE_CEILING`] disables the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: PRICE_CEILING,
        }
    }
}

impl PriceRange {
    /// Whether the upper bound is the "anything above" sentinel.
    #[must_use]
    pub fn is_unbounded_above(&self) -> bool {
        self.max >= PRICE_CEILING
    }

    /// Whether this range constrains anything at all.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.min > 0.0 || self.max < PRICE_CEILING
    }
}

/// Partial price window carried by a discovery fragment.
///
/// Each present sub-key overwrites the corresponding [`PriceRange`] field on
/// merge; absent sub-keys leave the target untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceBounds {
    /// Bounds constraining both ends of the window.
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// The complete set of active filter constraints.
///
/// Every set-valued field defaults to empty ("no constraint"). The default
/// value as a whole is fully permissive: [`crate::filter::matches`] accepts
/// every item against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub brands: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub conditions: BTreeSet<Condition>,
    pub categories: BTreeSet<String>,
    /// Accepted color terms, matched by case-insensitive containment.
    pub colors: BTreeSet<String>,
    /// Accepted material terms, matched by case-insensitive containment.
    pub materials: BTreeSet<String>,
    pub genders: BTreeSet<TargetGender>,
    pub age_groups: BTreeSet<AgeGroup>,
    pub seasons: BTreeSet<Season>,
    pub styles: BTreeSet<Style>,
    pub price_range: PriceRange,
    /// Minimum rating; 0 means unconstrained.
    pub rating: f64,
    pub featured_only: bool,
    pub in_stock_only: bool,
}

impl FilterCriteria {
    /// Returns this criteria value with `fragment` merged in.
    ///
    /// Merge rules: set-valued fields union; `price_range` sub-keys
    /// overwrite individually (last merged fragment wins); booleans and
    /// scalars overwrite when present.
    #[must_use]
    pub fn merged(mut self, fragment: &CriteriaFragment) -> Self {
        self.brands.extend(fragment.brands.iter().cloned());
        self.sizes.extend(fragment.sizes.iter().cloned());
        self.conditions.extend(fragment.conditions.iter().copied());
        self.categories.extend(fragment.categories.iter().cloned());
        self.colors.extend(fragment.colors.iter().cloned());
        self.materials.extend(fragment.materials.iter().cloned());
        self.genders.extend(fragment.genders.iter().copied());
        self.age_groups.extend(fragment.age_groups.iter().copied());
        self.seasons.extend(fragment.seasons.iter().copied());
        self.styles.extend(fragment.styles.iter().copied());

        if let Some(bounds) = fragment.price_range {
            if let Some(min) = bounds.min {
                self.price_range.min = min;
            }
            if let Some(max) = bounds.max {
                self.price_range.max = max;
            }
        }
        if let Some(rating) = fragment.rating {
            self.rating = rating;
        }
        if let Some(featured_only) = fragment.featured_only {
            self.featured_only = featured_only;
        }
        if let Some(in_stock_only) = fragment.in_stock_only {
            self.in_stock_only = in_stock_only;
        }
        self
    }

    /// Number of non-default constraint components, for UI filter badges.
    ///
    /// Each accepted set value counts individually; rating, the two flags,
    /// and a non-default price range count one each.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = self.brands.len()
            + self.sizes.len()
            + self.conditions.len()
            + self.categories.len()
            + self.colors.len()
            + self.materials.len()
            + self.genders.len()
            + self.age_groups.len()
            + self.seasons.len()
            + self.styles.len();
        if self.rating > 0.0 {
            count += 1;
        }
        if self.featured_only {
            count += 1;
        }
        if self.in_stock_only {
            count += 1;
        }
        if self.price_range.is_constrained() {
            count += 1;
        }
        count
    }
}

/// Partial criteria attached to a guided-discovery answer option.
///
/// Set-valued fields union into the target on merge; the scalar fields
/// overwrite only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriteriaFragment {
    pub brands: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub conditions: BTreeSet<Condition>,
    pub categories: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub materials: BTreeSet<String>,
    pub genders: BTreeSet<TargetGender>,
    pub age_groups: BTreeSet<AgeGroup>,
    pub seasons: BTreeSet<Season>,
    pub styles: BTreeSet<Style>,
    pub price_range: Option<PriceBounds>,
    pub rating: Option<f64>,
    pub featured_only: Option<bool>,
    pub in_stock_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    // Merge copies bounds verbatim, so float equality is sound here.
    #![allow(clippy::float_cmp)]

    use super::*;

    fn labels<const N: usize>(values: [&str; N]) -> BTreeSet<String> {
        values.into_iter().map(str::to_owned).collect()
    }

    #[test]
    fn default_criteria_is_fully_permissive() {
        let criteria = FilterCriteria::default();
        assert!(criteria.brands.is_empty());
        assert!(criteria.styles.is_empty());
        assert!(!criteria.price_range.is_constrained());
        assert!(criteria.price_range.is_unbounded_above());
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn active_filter_count_sums_components() {
        let criteria = FilterCriteria {
            brands: labels(["Nike"]),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.active_filter_count(), 1);

        let criteria = FilterCriteria {
            brands: labels(["Nike", "Adidas"]),
            sizes: labels(["M"]),
            rating: 4.0,
            featured_only: true,
            in_stock_only: true,
            price_range: PriceRange {
                min: 50.0,
                max: PRICE_CEILING,
            },
            ..FilterCriteria::default()
        };
        // 2 brands + 1 size + rating + featured + stock + price window
        assert_eq!(criteria.active_filter_count(), 7);
    }

    #[test]
    fn price_ceiling_does_not_count_as_constraint() {
        let criteria = FilterCriteria {
            price_range: PriceRange {
                min: 0.0,
                max: PRICE_CEILING,
            },
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn merged_unions_set_fields_without_duplicates() {
        let base = FilterCriteria {
            categories: labels(["jeans"]),
            ..FilterCriteria::default()
        };
        let fragment = CriteriaFragment {
            categories: labels(["jeans", "t-shirts"]),
            styles: [Style::Casual].into_iter().collect(),
            ..CriteriaFragment::default()
        };

        let merged = base.merged(&fragment);
        assert_eq!(merged.categories, labels(["jeans", "t-shirts"]));
        assert_eq!(merged.styles.len(), 1);
    }

    #[test]
    fn merged_overwrites_price_sub_keys_individually() {
        let base = FilterCriteria::default().merged(&CriteriaFragment {
            price_range: Some(PriceBounds::between(50.0, 150.0)),
            ..CriteriaFragment::default()
        });
        assert_eq!(base.price_range.min, 50.0);
        assert_eq!(base.price_range.max, 150.0);

        // A later fragment touching only `max` leaves `min` alone.
        let merged = base.merged(&CriteriaFragment {
            price_range: Some(PriceBounds {
                min: None,
                max: Some(300.0),
            }),
            ..CriteriaFragment::default()
        });
        assert_eq!(merged.price_range.min, 50.0);
        assert_eq!(merged.price_range.max, 300.0);
    }

    #[test]
    fn merged_last_writer_wins_on_overlapping_bounds() {
        let merged = FilterCriteria::default()
            .merged(&CriteriaFragment {
                price_range: Some(PriceBounds::between(0.0, 50.0)),
                ..CriteriaFragment::default()
            })
            .merged(&CriteriaFragment {
                price_range: Some(PriceBounds::between(300.0, PRICE_CEILING)),
                ..CriteriaFragment::default()
            });
        assert_eq!(merged.price_range.min, 300.0);
        assert_eq!(merged.price_range.max, PRICE_CEILING);
    }

    #[test]
    fn merged_is_order_independent_for_disjoint_fragments() {
        let occasion = CriteriaFragment {
            styles: [Style::Party].into_iter().collect(),
            categories: labels(["dresses"]),
            ..CriteriaFragment::default()
        };
        let audience = CriteriaFragment {
            genders: [TargetGender::Women].into_iter().collect(),
            ..CriteriaFragment::default()
        };

        let forward = FilterCriteria::default().merged(&occasion).merged(&audience);
        let reverse = FilterCriteria::default().merged(&audience).merged(&occasion);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn merged_overwrites_flags_and_rating() {
        let merged = FilterCriteria::default().merged(&CriteriaFragment {
            rating: Some(4.0),
            featured_only: Some(true),
            in_stock_only: Some(true),
            ..CriteriaFragment::default()
        });
        assert_eq!(merged.rating, 4.0);
        assert!(merged.featured_only);
        assert!(merged.in_stock_only);
    }
}

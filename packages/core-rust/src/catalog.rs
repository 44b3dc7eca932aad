//! Catalog item model and lenient document decoding.
//!
//! [`CatalogItem`] mirrors one product document from the hosted catalog
//! store. Documents arrive with uneven quality: fields may be missing,
//! numeric fields may be strings, and enum fields may carry values no
//! released client ever wrote. Those cases decode leniently -- the field
//! falls back to its default instead of sinking the whole item. A document
//! that still fails [`CatalogItem::from_document`] (not an object, or a
//! structurally mistyped field) is skipped by the feed.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Wear condition of a second-hand or new item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    /// Unworn, with or without tags.
    New,
    /// Worn a handful of times, no visible flaws.
    LikeNew,
    /// Normal signs of wear.
    Good,
    /// Noticeable wear, still wearable.
    Fair,
    /// Sold as a vintage piece; age is the point, not a defect.
    Vintage,
}

impl Condition {
    /// Wire/facet label for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like-new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Vintage => "vintage",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience a garment is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetGender {
    Men,
    Women,
    Unisex,
    Kids,
}

impl TargetGender {
    /// Wire/facet label for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Unisex => "unisex",
            Self::Kids => "kids",
        }
    }
}

impl fmt::Display for TargetGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bracket a garment is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGroup {
    Adult,
    Teen,
    Child,
    Toddler,
    Baby,
}

impl AgeGroup {
    /// Wire/facet label for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Teen => "teen",
            Self::Child => "child",
            Self::Toddler => "toddler",
            Self::Baby => "baby",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season a garment is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    AllSeason,
    Summer,
    Winter,
    Spring,
    Fall,
}

impl Season {
    /// Wire/facet label for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllSeason => "all-season",
            Self::Summer => "summer",
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style lane a garment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Casual,
    Formal,
    Business,
    Party,
    Vintage,
    Bohemian,
    Minimalist,
    Streetwear,
}

impl Style {
    /// Wire/facet label for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Business => "business",
            Self::Party => "party",
            Self::Vintage => "vintage",
            Self::Bohemian => "bohemian",
            Self::Minimalist => "minimalist",
            Self::Streetwear => "streetwear",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product document from the catalog store.
///
/// Owned by the external document store; this crate only reads it. String
/// fields use the empty string for "absent" (an empty value never
/// contributes to facets or positive matches). Enum fields are `None` when
/// the document omits them or carries an unrecognized value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogItem {
    /// Document identifier assigned by the catalog store.
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub category: String,
    /// Free text, e.g. "navy blue". Matched by substring containment.
    pub color: String,
    /// Free text, e.g. "organic cotton". Matched by substring containment.
    pub material: String,
    pub tags: Vec<String>,
    /// Size labels this item is available in.
    pub sizes: Vec<String>,
    /// Listing price. Non-numeric documents decode to 0.
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    /// Pre-discount price, when the seller recorded one.
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub original_price: Option<f64>,
    #[serde(deserialize_with = "lenient_variant")]
    pub condition: Option<Condition>,
    #[serde(deserialize_with = "lenient_variant")]
    pub target_gender: Option<TargetGender>,
    #[serde(deserialize_with = "lenient_variant")]
    pub age_group: Option<AgeGroup>,
    #[serde(deserialize_with = "lenient_variant")]
    pub season: Option<Season>,
    #[serde(deserialize_with = "lenient_variant")]
    pub style: Option<Style>,
    /// Average review rating, 0-5. Missing decodes to 0.
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    pub featured: bool,
    /// `None` means the document predates stock tracking; only an explicit
    /// `false` marks an item out of stock.
    pub in_stock: Option<bool>,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(deserialize_with = "lenient_i64")]
    pub created_at: i64,
}

impl CatalogItem {
    /// Decodes one raw catalog document.
    ///
    /// Recoverable field problems (missing fields, numeric strings, unknown
    /// enum values) fall back to defaults. A document that fails anyway is
    /// malformed beyond repair, and callers are expected to skip it.
    pub fn from_document(document: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }
}

/// Ports `parseFloat(x) || 0`: number or numeric string, anything else 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value).unwrap_or(0.0))
}

/// Like [`lenient_f64`] but keeps "absent" distinct from 0.
fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Epoch-millis timestamps: number or numeric string, anything else 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let millis = match &value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(millis.unwrap_or(0))
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Decodes an enum field, mapping unknown or mistyped values to `None`.
fn lenient_variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

//! The unified product record assembled from a product page and its
//! secondary sources.
//!
//! Field names on the wire follow the JSON dump format (`ID`, `ImageURL`,
//! `TaleOfSize.size_chart`, ...). Every field carries `#[serde(default)]` so
//! a partially populated document still decodes into a complete record, and
//! lists always serialize as `[]` rather than `null`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Currency label attached to every price. The storefront only sells in yen
/// and the symbol is not present in the price markup.
pub const DEFAULT_CURRENCY: &str = "¥";

/// Variant key and header row key the size-chart API uses for the primary grid.
const PRIMARY_KEY: &str = "0";

/// One product as scraped from the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProductRecord {
    #[serde(rename = "ID")]
    pub id: String,
    /// Internal product-family code taken from the last breadcrumb link,
    /// e.g. `"AB1234"`. Empty when the page has no breadcrumb beyond the root.
    pub model: String,
    #[serde(rename = "URL")]
    pub url: String,
    /// Breadcrumb entries after the root joined with `" / "`.
    pub breadcrumb: String,
    #[serde(rename = "ImageURL")]
    pub image_urls: Vec<String>,
    pub category: String,
    pub name: String,
    /// Price digits with thousands separators removed, e.g. `"12800"`.
    pub price: String,
    pub currency: String,
    #[serde(rename = "AvailableSize")]
    pub available_sizes: Vec<String>,
    /// `"Appropriate: <percent>%"` when the size-fit marker is present.
    pub sense_of_size: String,
    pub description: DescriptionDetails,
    pub tale_of_size: SizeChart,
    pub special_function: String,
    pub review: ReviewSummary,
    #[serde(rename = "KWs")]
    pub keywords: Vec<String>,
}

impl ProductRecord {
    /// Returns an otherwise empty record for `id`, fetched from `url`.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            ..Self::default()
        }
    }

    /// Price prefixed with its currency symbol, e.g. `"¥ 12800"`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("{} {}", self.currency, self.price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DescriptionDetails {
    pub title: String,
    pub general: String,
    /// Bullet list, one `"• item"` per line, lines separated by `"\r\n"`.
    pub itemization: String,
}

/// Size-chart API payload: chart variants keyed by position (`"0"`, `"1"`, ...).
///
/// Only the `"0"` variant is ever read; any other variant is carried through
/// the JSON dump untouched but ignored by the spreadsheet layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeChart {
    #[serde(deserialize_with = "variants_or_empty")]
    pub size_chart: BTreeMap<String, SizeVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeVariant {
    #[serde(deserialize_with = "grid_or_empty")]
    pub body: SizeGrid,
    #[serde(deserialize_with = "grid_or_empty")]
    pub header: SizeGrid,
}

/// Rows keyed by position, each row's cells keyed by position.
pub type SizeGrid = BTreeMap<String, BTreeMap<String, SizeCell>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeCell {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

// The size-chart API sends `null` for blank cells and absent grids. A null
// anywhere in the chart decodes to the empty value so the rest survives.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn variants_or_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, SizeVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<SizeVariant>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, variant)| (key, variant.unwrap_or_default()))
        .collect())
}

fn grid_or_empty<'de, D>(deserializer: D) -> Result<SizeGrid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<BTreeMap<String, Option<SizeCell>>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, row)| {
            let cells = row
                .unwrap_or_default()
                .into_iter()
                .map(|(col, cell)| (col, cell.unwrap_or_default()))
                .collect();
            (key, cells)
        })
        .collect())
}

impl SizeChart {
    /// The primary chart variant, if the API returned one.
    #[must_use]
    pub fn primary(&self) -> Option<&SizeVariant> {
        self.size_chart.get(PRIMARY_KEY)
    }

    /// Header row `"0"` of the primary variant, in key order.
    ///
    /// Empty when the variant or the header row is missing.
    #[must_use]
    pub fn header_values(&self) -> Vec<&str> {
        self.primary()
            .and_then(|variant| variant.header.get(PRIMARY_KEY))
            .map(|row| row.values().map(|cell| cell.value.as_str()).collect())
            .unwrap_or_default()
    }

    /// Body rows of the primary variant, each row's cells in key order.
    ///
    /// Rows come back in key order too. Empty when the variant is missing.
    #[must_use]
    pub fn body_rows(&self) -> Vec<Vec<&str>> {
        self.primary()
            .map(|variant| {
                variant
                    .body
                    .values()
                    .map(|row| row.values().map(|cell| cell.value.as_str()).collect())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header_values().is_empty() && self.body_rows().iter().all(Vec::is_empty)
    }
}

/// Aggregate ratings plus individual reviews from the ratings micro-site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReviewSummary {
    pub rating: String,
    pub number_of_reviews: String,
    pub recommended_rate: String,
    pub sense_of_fitting: String,
    pub appropriation_of_length: String,
    pub quality_of_material: String,
    pub comfort: String,
    pub details: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReviewEntry {
    pub date: String,
    /// Rating as displayed, e.g. `"4 / 5"`.
    pub rating: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "ReviewerID")]
    pub reviewer_id: String,
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

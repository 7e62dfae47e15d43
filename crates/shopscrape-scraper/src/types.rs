//! Response types for the storefront's JSON endpoints.
//!
//! The size-chart payload decodes straight into
//! [`shopscrape_core::SizeChart`]; only the listing endpoint needs a
//! dedicated wrapper.

use serde::{Deserialize, Deserializer};

/// Response from `GET <listing>?gender=..&limit=..&page=..`.
///
/// The endpoint returns a large object; only the ordered ID list is read.
/// A page past the end of the catalog omits the field, or sends `null` or
/// `[]`; all three decode to an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(
        default,
        rename = "articles_sort_list",
        deserialize_with = "ids_or_empty"
    )]
    pub product_ids: Vec<String>,
}

fn ids_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

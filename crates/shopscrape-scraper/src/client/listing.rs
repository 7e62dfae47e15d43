//! Page-counter pagination over the product listing API.

use crate::error::ScraperError;
use crate::types::ListingResponse;

use super::ShopClient;
use super::MAX_PAGES;

impl ShopClient {
    /// Fetches one listing page and returns its product IDs in listing order.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors from [`Self::get_text`] and
    /// returns [`ScraperError::Deserialize`] when the body is not valid JSON.
    pub async fn fetch_listing_page(
        &self,
        page_size: u32,
        page: u32,
    ) -> Result<Vec<String>, ScraperError> {
        let url = self.listing_page_url(page_size, page)?;
        let body = self.get_text(&url).await?;
        let parsed = serde_json::from_str::<ListingResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("listing page {page}"),
                source: e,
            }
        })?;
        Ok(parsed.product_ids)
    }

    /// Collects exactly `limit` product IDs (or fewer if the catalog runs out).
    ///
    /// Requests pages 1, 2, ... until the accumulated count reaches `limit`,
    /// then truncates. A page with no IDs ends pagination early. A `limit`
    /// of zero issues no requests.
    ///
    /// Unlike the per-product fetchers this is not fail-soft: a failed page
    /// aborts the gather and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_listing_page`].
    /// Returns [`ScraperError::PaginationLimit`] if more than [`MAX_PAGES`]
    /// pages would be needed.
    pub async fn fetch_product_ids(
        &self,
        limit: usize,
        page_size: u32,
    ) -> Result<Vec<String>, ScraperError> {
        let mut product_ids: Vec<String> = Vec::new();
        let mut page = 0u32;

        while product_ids.len() < limit {
            page += 1;
            if page > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    listing_url: self.endpoints.listing_url.clone(),
                    max_pages: MAX_PAGES,
                });
            }

            let ids = self.fetch_listing_page(page_size, page).await?;
            if ids.is_empty() {
                tracing::warn!(
                    page,
                    collected = product_ids.len(),
                    limit,
                    "listing returned an empty page; stopping early"
                );
                break;
            }
            tracing::debug!(page, count = ids.len(), "fetched listing page");
            product_ids.extend(ids);
        }

        product_ids.truncate(limit);
        Ok(product_ids)
    }
}

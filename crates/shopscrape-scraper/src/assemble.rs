//! Per-product record assembly.
//!
//! One product is one linear pass: fetch the page, run every page extractor
//! against the same parsed tree, then use the model code from the breadcrumb
//! to query the size-chart and ratings sources. Every step that can fail
//! falls back to its empty value, so a record is always produced.

use scraper::Html;
use shopscrape_core::{DescriptionDetails, ProductRecord, ReviewSummary, SizeChart};

use crate::client::ShopClient;
use crate::embedded;
use crate::selectors::{self, Breadcrumb};

/// Everything read from the product page itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub breadcrumb: Breadcrumb,
    pub image_urls: Vec<String>,
    pub category: String,
    pub name: String,
    pub price: String,
    pub available_sizes: Vec<String>,
    pub sense_of_size: String,
    pub description: DescriptionDetails,
    pub special_function: String,
    pub keywords: Vec<String>,
}

/// Parses `body` once and runs all page extractors over it.
///
/// `host` prefixes the relative image paths found in the embedded payload.
/// An empty body yields [`PageFields::default`].
#[must_use]
pub fn extract_page(body: &str, host: &str) -> PageFields {
    let doc = Html::parse_document(body);

    PageFields {
        breadcrumb: selectors::breadcrumb(&doc),
        image_urls: embedded::image_urls(&doc, host),
        category: selectors::category(&doc),
        name: selectors::name(&doc),
        price: selectors::price(&doc),
        available_sizes: selectors::available_sizes(&doc),
        sense_of_size: selectors::sense_of_size(&doc, body),
        description: selectors::description(&doc),
        special_function: selectors::special_function(&doc),
        keywords: selectors::keywords(&doc),
    }
}

impl PageFields {
    /// Combines the page fields with the secondary-source results.
    #[must_use]
    pub fn into_record(
        self,
        product_id: &str,
        url: &str,
        tale_of_size: SizeChart,
        review: ReviewSummary,
    ) -> ProductRecord {
        ProductRecord {
            model: self.breadcrumb.model,
            breadcrumb: self.breadcrumb.path,
            image_urls: self.image_urls,
            category: self.category,
            name: self.name,
            price: self.price,
            available_sizes: self.available_sizes,
            sense_of_size: self.sense_of_size,
            description: self.description,
            tale_of_size,
            special_function: self.special_function,
            review,
            keywords: self.keywords,
            ..ProductRecord::new(product_id, url)
        }
    }
}

impl ShopClient {
    /// Builds the full record for one product.
    ///
    /// Never fails. A page that cannot be fetched is treated as an empty
    /// page, and a failed size-chart or ratings request leaves that part of
    /// the record empty. Each fallback is logged at `warn`.
    ///
    /// When the breadcrumb yields no model code the secondary sources are
    /// still queried with the empty code.
    pub async fn fetch_record(&self, product_id: &str) -> ProductRecord {
        let url = self.product_url(product_id);

        let body = match self.get_text(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "product page fetch failed; using empty page");
                String::new()
            }
        };
        let page = extract_page(&body, &self.endpoints.host);
        let model = page.breadcrumb.model.clone();

        let tale_of_size = self.fetch_size_chart(&model).await.unwrap_or_else(|e| {
            tracing::warn!(product_id, model = %model, error = %e, "size chart unavailable");
            SizeChart::default()
        });

        let review = self
            .fetch_reviews(&model, product_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(product_id, model = %model, error = %e, "reviews unavailable");
                ReviewSummary::default()
            });

        tracing::debug!(
            product_id,
            model = %model,
            images = page.image_urls.len(),
            sizes = page.available_sizes.len(),
            reviews = review.details.len(),
            "assembled product record"
        );

        page.into_record(product_id, &url, tale_of_size, review)
    }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;

use std::path::PathBuf;

/// Runtime settings for a crawl, resolved from environment variables.
///
/// Every field has a default, so an empty environment yields a usable
/// configuration pointed at the production storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storefront origin used for product pages and absolute image URLs.
    pub host: String,
    /// Paginated product-list endpoint returning `articles_sort_list`.
    pub listing_url: String,
    /// Size-chart endpoint; the model code is appended as a path segment.
    pub size_chart_url: String,
    /// Ratings micro-site base; `/<model>/reviews.djs` is appended.
    pub reviews_url: String,
    /// Number of product IDs to gather before assembling records.
    pub product_limit: usize,
    /// `limit` query parameter sent to the listing endpoint.
    pub listing_page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub json_out: PathBuf,
    pub xlsx_out: PathBuf,
}

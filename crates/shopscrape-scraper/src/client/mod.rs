//! HTTP client for the storefront, its listing API, and the two secondary
//! sources (size-chart API and ratings micro-site).

mod listing;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Maximum number of listing pages to request before returning an error.
/// Prevents runaway loops when the listing keeps returning short pages.
pub(crate) const MAX_PAGES: u32 = 200;

/// Gender filter sent with every listing request.
const LISTING_GENDER: &str = "mens";

/// Base URLs for every endpoint the scraper talks to, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Storefront origin, e.g. `https://shop.adidas.jp`.
    pub host: String,
    pub listing_url: String,
    pub size_chart_url: String,
    pub reviews_url: String,
}

impl Endpoints {
    /// Points every endpoint at a single origin using the storefront's path
    /// layout. The ratings base gets a `/reviews` prefix.
    #[must_use]
    pub fn from_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            host: origin.to_owned(),
            listing_url: format!("{origin}/f/v1/pub/product/list"),
            size_chart_url: format!("{origin}/f/v1/pub/size_chart"),
            reviews_url: format!("{origin}/reviews"),
        }
    }
}

impl From<&shopscrape_core::AppConfig> for Endpoints {
    fn from(config: &shopscrape_core::AppConfig) -> Self {
        Self {
            host: config.host.clone(),
            listing_url: config.listing_url.clone(),
            size_chart_url: config.size_chart_url.clone(),
            reviews_url: config.reviews_url.clone(),
        }
    }
}

/// Plain GET client shared by the listing gatherer, the record assembler
/// and the secondary fetchers.
///
/// Requests are issued one at a time by callers; the client never retries.
/// Non-2xx responses surface as typed errors so each caller can decide
/// whether to fall back to an empty value.
pub struct ShopClient {
    pub(crate) client: Client,
    pub(crate) endpoints: Endpoints,
}

impl ShopClient {
    /// Creates a `ShopClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoints })
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GETs `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, timeout or body decoding failure.
    pub async fn get_text(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/json;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Storefront page URL for a product: `<host>/products/<id>/`.
    #[must_use]
    pub fn product_url(&self, product_id: &str) -> String {
        format!("{}/products/{product_id}/", self.endpoints.host)
    }

    /// Size-chart URL for a model code: `<size_chart_url>/<model>`.
    #[must_use]
    pub fn size_chart_url(&self, model: &str) -> String {
        format!("{}/{model}", self.endpoints.size_chart_url)
    }

    /// Ratings URL: `<reviews_url>/<model>/reviews.djs?format=embeddedhtml&productattribute_itemKcod=<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured base cannot be
    /// parsed as a URL.
    pub fn reviews_url(&self, model: &str, product_id: &str) -> Result<String, ScraperError> {
        let base = format!("{}/{model}/reviews.djs", self.endpoints.reviews_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("format", "embeddedhtml")
            .append_pair("productattribute_itemKcod", product_id);
        Ok(url.to_string())
    }

    /// Listing URL for a 1-based page: `<listing_url>?gender=mens&limit=<n>&page=<p>`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured listing URL
    /// cannot be parsed.
    pub fn listing_page_url(&self, page_size: u32, page: u32) -> Result<String, ScraperError> {
        let base = &self.endpoints.listing_url;
        let mut url = reqwest::Url::parse(base).map_err(|e| ScraperError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("gender", LISTING_GENDER)
            .append_pair("limit", &page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;

//! Size-chart API fetcher.

use shopscrape_core::SizeChart;

use crate::client::ShopClient;
use crate::error::ScraperError;

/// Decodes a size-chart API body.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] when the body is not JSON of the
/// expected shape.
pub fn decode_size_chart(body: &str, model: &str) -> Result<SizeChart, ScraperError> {
    serde_json::from_str::<SizeChart>(body).map_err(|e| ScraperError::Deserialize {
        context: format!("size chart for model \"{model}\""),
        source: e,
    })
}

impl ShopClient {
    /// Fetches the size chart for `model`.
    ///
    /// An empty model code is still requested; the API answers with an
    /// error or an empty chart and the caller falls back to
    /// [`SizeChart::default`].
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors from [`Self::get_text`] and
    /// decode errors from [`decode_size_chart`].
    pub async fn fetch_size_chart(&self, model: &str) -> Result<SizeChart, ScraperError> {
        let url = self.size_chart_url(model);
        let body = self.get_text(&url).await?;
        decode_size_chart(&body, model)
    }
}

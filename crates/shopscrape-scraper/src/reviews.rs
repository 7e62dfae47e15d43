//! Ratings micro-site fetcher.
//!
//! The endpoint answers with a JavaScript snippet, not JSON. The rendered
//! widget sits inside it as a string literal under `BVRRRatingSummarySourceID`,
//! with quotes, slashes and line breaks backslash-escaped. The literal is
//! pulled out with a pattern, unescaped, and parsed as HTML.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use shopscrape_core::{ReviewEntry, ReviewSummary};

use crate::client::ShopClient;
use crate::error::ScraperError;
use crate::selectors::{first_attr, joined_text};

static RATING_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"materials\s*=\s*\{\s*"BVRRRatingSummarySourceID":\s*"(.*?)"\s*\}"#)
        .expect("valid regex")
});

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid CSS selector")
}

static OVERALL_RATING: LazyLock<Selector> =
    LazyLock::new(|| css("#BVRRWidgetID #BVRRRatingOverall_ .BVRRRatingNumber"));
static REVIEW_COUNT: LazyLock<Selector> =
    LazyLock::new(|| css("#BVRRWidgetID .BVRRBuyAgainTotal"));
static RECOMMENDED_RATE: LazyLock<Selector> =
    LazyLock::new(|| css("#BVRRWidgetID .BVRRBuyAgainPercentage"));
static FIT_IMAGE: LazyLock<Selector> = LazyLock::new(|| secondary_rating_image("Fit"));
static LENGTH_IMAGE: LazyLock<Selector> = LazyLock::new(|| secondary_rating_image("Length"));
static QUALITY_IMAGE: LazyLock<Selector> = LazyLock::new(|| secondary_rating_image("Quality"));
static COMFORT_IMAGE: LazyLock<Selector> = LazyLock::new(|| secondary_rating_image("Comfort"));

static REVIEW_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| css("#BVRRWidgetID #BVRRDisplayContentBodyID .BVRRContentReview"));
static ENTRY_RATING_NUMBER: LazyLock<Selector> =
    LazyLock::new(|| css(".BVRRRatingNormalOutOf .BVRRRatingNumber"));
static ENTRY_RATING_SEPARATOR: LazyLock<Selector> =
    LazyLock::new(|| css(".BVRRRatingNormalOutOf .BVRRSeparatorText"));
static ENTRY_RATING_RANGE: LazyLock<Selector> =
    LazyLock::new(|| css(".BVRRRatingNormalOutOf .BVRRRatingRangeNumber"));
static ENTRY_TITLE: LazyLock<Selector> = LazyLock::new(|| css(".BVRRReviewTitle"));
static ENTRY_DATE: LazyLock<Selector> = LazyLock::new(|| css(".BVRRReviewDate"));
static ENTRY_TEXT: LazyLock<Selector> = LazyLock::new(|| css(".BVRRReviewText"));
static ENTRY_NICKNAME: LazyLock<Selector> = LazyLock::new(|| css(".BVRRNickname"));

fn secondary_rating_image(dimension: &str) -> Selector {
    css(&format!(
        ".BVRRSecondaryRatingsContainer .BVRRRating{dimension} .BVRRRatingRadioImage img"
    ))
}

/// Extracts and unescapes the widget HTML from a ratings response body.
///
/// Returns `None` when the body has no rating-summary literal, which is what
/// the endpoint serves for products without reviews.
#[must_use]
pub fn extract_ratings_fragment(body: &str) -> Option<String> {
    let captures = RATING_SUMMARY_RE.captures(body)?;
    Some(unescape_fragment(captures.get(1)?.as_str()))
}

/// Undoes the widget's string-literal escaping in a single left-to-right pass.
///
/// Only four sequences are recognised: `\n` and `\r` are dropped, `\"`
/// becomes `"` and `\/` becomes `/`. Any other backslash is kept as-is.
#[must_use]
pub fn unescape_fragment(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n' | 'r') => {
                chars.next();
            }
            Some(next @ ('"' | '/')) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Reads the aggregate ratings and every review block from widget HTML.
#[must_use]
pub fn parse_review_summary(fragment: &str) -> ReviewSummary {
    let doc = Html::parse_document(fragment);

    ReviewSummary {
        rating: joined_text(doc.select(&OVERALL_RATING)),
        number_of_reviews: joined_text(doc.select(&REVIEW_COUNT)),
        recommended_rate: joined_text(doc.select(&RECOMMENDED_RATE)),
        sense_of_fitting: first_attr(doc.select(&FIT_IMAGE), "title"),
        appropriation_of_length: first_attr(doc.select(&LENGTH_IMAGE), "title"),
        quality_of_material: first_attr(doc.select(&QUALITY_IMAGE), "title"),
        comfort: first_attr(doc.select(&COMFORT_IMAGE), "title"),
        details: doc.select(&REVIEW_BLOCK).map(review_entry).collect(),
    }
}

/// Rating is number, separator and range joined by single spaces; parts
/// missing from the block are skipped rather than left as blank gaps.
fn review_entry(block: ElementRef<'_>) -> ReviewEntry {
    let rating = [
        &ENTRY_RATING_NUMBER,
        &ENTRY_RATING_SEPARATOR,
        &ENTRY_RATING_RANGE,
    ]
    .into_iter()
    .map(|selector| joined_text(block.select(selector)))
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    ReviewEntry {
        date: joined_text(block.select(&ENTRY_DATE)),
        rating,
        title: joined_text(block.select(&ENTRY_TITLE)),
        description: joined_text(block.select(&ENTRY_TEXT)),
        reviewer_id: joined_text(block.select(&ENTRY_NICKNAME)),
    }
}

impl ShopClient {
    /// Fetches the ratings widget for one product of `model`.
    ///
    /// A response without the rating-summary literal yields the empty
    /// summary; that is the usual answer for products nobody has reviewed.
    ///
    /// # Errors
    ///
    /// Propagates URL, transport and status errors. The body itself never
    /// produces an error.
    pub async fn fetch_reviews(
        &self,
        model: &str,
        product_id: &str,
    ) -> Result<ReviewSummary, ScraperError> {
        let url = self.reviews_url(model, product_id)?;
        let body = self.get_text(&url).await?;
        let Some(fragment) = extract_ratings_fragment(&body) else {
            tracing::debug!(product_id, model, "no ratings summary in response");
            return Ok(ReviewSummary::default());
        };
        Ok(parse_review_summary(&fragment))
    }
}

#[cfg(test)]
#[path = "reviews_test.rs"]
mod tests;

//! Integration tests for `ShopClient` against a local `wiremock` server.
//!
//! Covers listing pagination and the per-product record assembly,
//! including every fail-soft path of the secondary sources.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopscrape_core::SizeChart;
use shopscrape_scraper::{Endpoints, ScraperError, ShopClient};

const LISTING_PATH: &str = "/f/v1/pub/product/list";

/// Builds a `ShopClient` with every endpoint pointed at `server`.
fn test_client(server: &MockServer) -> ShopClient {
    ShopClient::new(Endpoints::from_origin(&server.uri()), 5, "shopscrape-test/0.1")
        .expect("failed to build test ShopClient")
}

fn listing_page(first: usize, count: usize) -> serde_json::Value {
    let ids: Vec<String> = (first..first + count).map(|n| format!("ID{n:04}")).collect();
    json!({ "articles_sort_list": ids, "total": 9999 })
}

async fn mount_listing_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("gender", "mens"))
        .and(query_param("limit", "120"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(server)
        .await;
}

const PRODUCT_PAGE: &str = r#"<html><head></head><body>
<ul>
  <li class="breadcrumbListItem"><a href="/">Home</a></li>
  <li class="breadcrumbListItem"><a href="/category/shoes/">Shoes</a></li>
  <li class="breadcrumbListItem"><a href="/model/AB1234/">Running</a></li>
</ul>
<h1 class="itemTitle">Adizero Boston</h1>
<span class="price-value">12,800</span>
</body></html>"#;

async fn mount_product_page(server: &MockServer, id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{id}/")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Listing pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_ids_requests_three_pages_and_truncates() {
    let server = MockServer::start().await;
    mount_listing_page(&server, 1, listing_page(0, 120)).await;
    mount_listing_page(&server, 2, listing_page(120, 120)).await;
    mount_listing_page(&server, 3, listing_page(240, 120)).await;

    let ids = test_client(&server)
        .fetch_product_ids(250, 120)
        .await
        .expect("listing should succeed");

    assert_eq!(ids.len(), 250);
    assert_eq!(ids.first().map(String::as_str), Some("ID0000"));
    assert_eq!(ids.last().map(String::as_str), Some("ID0249"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3, "expected exactly 3 listing requests");
}

#[tokio::test]
async fn fetch_product_ids_stops_on_empty_page() {
    let server = MockServer::start().await;
    mount_listing_page(&server, 1, listing_page(0, 120)).await;
    mount_listing_page(&server, 2, json!({ "articles_sort_list": [] })).await;

    let ids = test_client(&server)
        .fetch_product_ids(500, 120)
        .await
        .expect("listing should succeed");

    assert_eq!(ids.len(), 120);
}

#[tokio::test]
async fn fetch_product_ids_missing_field_is_empty_page() {
    let server = MockServer::start().await;
    mount_listing_page(&server, 1, json!({ "unrelated": true })).await;

    let ids = test_client(&server)
        .fetch_product_ids(10, 120)
        .await
        .expect("listing should succeed");

    assert!(ids.is_empty());
}

#[tokio::test]
async fn fetch_product_ids_null_field_ends_pagination() {
    let server = MockServer::start().await;
    mount_listing_page(&server, 1, listing_page(0, 120)).await;
    mount_listing_page(&server, 2, json!({ "articles_sort_list": null })).await;

    let ids = test_client(&server)
        .fetch_product_ids(500, 120)
        .await
        .expect("null ID list should end pagination, not fail");

    assert_eq!(ids.len(), 120);
}

#[tokio::test]
async fn fetch_product_ids_zero_limit_makes_no_requests() {
    let server = MockServer::start().await;

    let ids = test_client(&server)
        .fetch_product_ids(0, 120)
        .await
        .expect("zero limit should succeed");

    assert!(ids.is_empty());
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn fetch_product_ids_propagates_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_product_ids(10, 120).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_product_ids_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_product_ids(10, 120).await;

    assert!(
        matches!(result, Err(ScraperError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Record assembly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_record_assembles_page_fields() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert_eq!(record.id, "AB1234");
    assert_eq!(record.url, format!("{}/products/AB1234/", server.uri()));
    assert_eq!(record.breadcrumb, "Shoes / Running");
    assert_eq!(record.model, "AB1234");
    assert_eq!(record.name, "Adizero Boston");
    assert_eq!(record.price, "12800");
    assert_eq!(record.currency, "¥");
    assert!(record.image_urls.is_empty());
}

#[tokio::test]
async fn fetch_record_reads_size_chart_and_reviews_for_model() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;

    Mock::given(method("GET"))
        .and(path("/f/v1/pub/size_chart/AB1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "size_chart": {"0": {
                "header": {"0": {"0": {"value": "Size"}, "1": {"value": "26.0"}}},
                "body": {"0": {"0": {"value": "Foot"}, "1": {"value": "26.0cm"}}}
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ratings = r#"var materials={"BVRRRatingSummarySourceID":"<div id=\"BVRRWidgetID\"><div id=\"BVRRRatingOverall_\"><span class=\"BVRRRatingNumber\">4.2<\/span><\/div><span class=\"BVRRBuyAgainTotal\">7<\/span><\/div>"};"#;
    Mock::given(method("GET"))
        .and(path("/reviews/AB1234/reviews.djs"))
        .and(query_param("format", "embeddedhtml"))
        .and(query_param("productattribute_itemKcod", "AB1234"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ratings))
        .expect(1)
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert_eq!(record.tale_of_size.header_values(), vec!["Size", "26.0"]);
    assert_eq!(record.tale_of_size.body_rows(), vec![vec!["Foot", "26.0cm"]]);
    assert_eq!(record.review.rating, "4.2");
    assert_eq!(record.review.number_of_reviews, "7");
    assert!(record.review.details.is_empty());
}

#[tokio::test]
async fn fetch_record_size_chart_404_is_empty_chart() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/f/v1/pub/size_chart/AB1234"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert_eq!(record.tale_of_size, SizeChart::default());
    assert_eq!(record.model, "AB1234");
}

#[tokio::test]
async fn fetch_record_keeps_size_chart_with_blank_cell() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/f/v1/pub/size_chart/AB1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "size_chart": {"0": {
                "header": {"0": {"0": {"value": "Size"}, "1": {"value": null}}},
                "body": {"0": {"0": {"value": "Foot"}}}
            }}
        })))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert_eq!(record.tale_of_size.header_values(), vec!["Size", ""]);
    assert_eq!(record.tale_of_size.body_rows(), vec![vec!["Foot"]]);
}

#[tokio::test]
async fn fetch_record_malformed_size_chart_is_empty_chart() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/f/v1/pub/size_chart/AB1234"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"size_chart\": [1, 2"))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert!(record.tale_of_size.is_empty());
}

#[tokio::test]
async fn fetch_record_reviews_without_summary_is_empty() {
    let server = MockServer::start().await;
    mount_product_page(&server, "AB1234", PRODUCT_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/reviews/AB1234/reviews.djs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("var materials={};"))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("AB1234").await;

    assert_eq!(record.review, shopscrape_core::ReviewSummary::default());
}

#[tokio::test]
async fn fetch_record_page_error_still_produces_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ZZ0000/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_record("ZZ0000").await;

    assert_eq!(record.id, "ZZ0000");
    assert_eq!(record.currency, "¥");
    assert_eq!(record.model, "");
    assert_eq!(record.breadcrumb, "");
    assert!(record.available_sizes.is_empty());
    assert!(record.tale_of_size.is_empty());
    assert!(record.review.details.is_empty());
}

//! Image URLs from the page's embedded `__NEXT_DATA__` payload.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

static NEXT_DATA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script#__NEXT_DATA__").expect("valid CSS selector"));

/// Key path from the payload root to the per-image detail array.
const IMAGE_DETAILS_PATH: [&str; 9] = [
    "props",
    "pageProps",
    "apis",
    "pdpInitialProps",
    "detailApi",
    "product",
    "article",
    "image",
    "details",
];

/// Follows `path` through nested objects, stopping at the first missing key
/// or non-object value.
#[must_use]
pub fn json_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.as_object()?.get(*key))
}

/// Absolute large-image URLs for the product, in payload order.
///
/// Returns an empty list when the script tag is absent, its JSON does not
/// parse (logged), or any key on the path is missing or of the wrong type.
/// Detail entries without a string `imageUrl.large` are skipped.
#[must_use]
pub fn image_urls(doc: &Html, host: &str) -> Vec<String> {
    let Some(script) = doc.select(&NEXT_DATA).next() else {
        return Vec::new();
    };
    let text: String = script.text().collect();

    let payload: Value = match serde_json::from_str(&text) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse __NEXT_DATA__ payload");
            return Vec::new();
        }
    };

    image_urls_from_payload(&payload, host)
}

/// Walks a decoded payload to its image list. See [`image_urls`].
#[must_use]
pub fn image_urls_from_payload(payload: &Value, host: &str) -> Vec<String> {
    let Some(details) = json_path(payload, &IMAGE_DETAILS_PATH).and_then(Value::as_array) else {
        tracing::debug!("embedded payload has no image details");
        return Vec::new();
    };

    details
        .iter()
        .filter_map(|detail| json_path(detail, &["imageUrl", "large"])?.as_str())
        .map(|large| format!("{host}{large}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const HOST: &str = "https://shop.example.com";

    fn payload_with(details: &Value) -> Value {
        json!({"props": {"pageProps": {"apis": {"pdpInitialProps": {"detailApi": {
            "product": {"article": {"image": {"details": details}}}
        }}}}}})
    }

    fn page_with_script(script: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><script id="__NEXT_DATA__" type="application/json">{script}</script></head><body></body></html>"#
        ))
    }

    #[test]
    fn json_path_follows_nested_keys() {
        let value = json!({"a": {"b": {"c": 3}}});
        assert_eq!(json_path(&value, &["a", "b", "c"]), Some(&json!(3)));
    }

    #[test]
    fn json_path_stops_at_missing_key() {
        let value = json!({"a": {"b": 1}});
        assert_eq!(json_path(&value, &["a", "x", "c"]), None);
    }

    #[test]
    fn json_path_stops_at_non_object() {
        let value = json!({"a": [1, 2]});
        assert_eq!(json_path(&value, &["a", "b"]), None);
    }

    #[test]
    fn image_urls_prefixes_host_in_order() {
        let payload = payload_with(&json!([
            {"imageUrl": {"large": "/img/1_large.jpg", "small": "/img/1_small.jpg"}},
            {"imageUrl": {"large": "/img/2_large.jpg"}}
        ]));
        let doc = page_with_script(&payload.to_string());
        assert_eq!(
            image_urls(&doc, HOST),
            vec![
                "https://shop.example.com/img/1_large.jpg",
                "https://shop.example.com/img/2_large.jpg"
            ]
        );
    }

    #[test]
    fn image_urls_skips_entries_without_large_url() {
        let payload = payload_with(&json!([
            {"imageUrl": {"small": "/img/1_small.jpg"}},
            {"imageUrl": {"large": 42}},
            {"other": true},
            {"imageUrl": {"large": "/img/4_large.jpg"}}
        ]));
        assert_eq!(
            image_urls_from_payload(&payload, HOST),
            vec!["https://shop.example.com/img/4_large.jpg"]
        );
    }

    #[test]
    fn image_urls_missing_script_is_empty() {
        let doc = Html::parse_document("<html><body><p>no data</p></body></html>");
        assert!(image_urls(&doc, HOST).is_empty());
    }

    #[test]
    fn image_urls_malformed_json_is_empty() {
        let doc = page_with_script("{\"props\": ");
        assert!(image_urls(&doc, HOST).is_empty());
    }

    #[test]
    fn image_urls_missing_key_is_empty() {
        let payload = json!({"props": {"pageProps": {"apis": {}}}});
        let doc = page_with_script(&payload.to_string());
        assert!(image_urls(&doc, HOST).is_empty());
    }

    #[test]
    fn image_urls_details_not_an_array_is_empty() {
        let payload = payload_with(&json!({"imageUrl": {"large": "/img/1.jpg"}}));
        assert!(image_urls_from_payload(&payload, HOST).is_empty());
    }
}

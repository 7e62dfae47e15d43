//! Field extractors for the storefront product page.
//!
//! Every function borrows an already-parsed [`Html`] and returns a plain
//! value. A selector whose target element is absent yields the empty value
//! for its type; absence is the normal case for optional widgets and is not
//! logged.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use shopscrape_core::DescriptionDetails;

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid CSS selector")
}

static BREADCRUMB_LINK: LazyLock<Selector> = LazyLock::new(|| css(".breadcrumbListItem a"));
static CATEGORY: LazyLock<Selector> = LazyLock::new(|| css(".groupName"));
static NAME: LazyLock<Selector> = LazyLock::new(|| css(".itemTitle"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| css(".price-value"));
static SIZE_BUTTON: LazyLock<Selector> = LazyLock::new(|| css(".sizeSelectorListItem button"));
static SIZE_MARKER: LazyLock<Selector> = LazyLock::new(|| css(".bar .marker"));
static FEATURE_TITLE: LazyLock<Selector> = LazyLock::new(|| css(".itemFeature"));
static DESCRIPTION_BODY: LazyLock<Selector> = LazyLock::new(|| css(".description_part.details"));
static FEATURE_ITEM: LazyLock<Selector> = LazyLock::new(|| css(".articleFeaturesItem"));
static SPECIAL_FUNCTION: LazyLock<Selector> = LazyLock::new(|| css(".item_part.details"));
static SPECIAL_FUNCTION_LINK: LazyLock<Selector> = LazyLock::new(|| css(".item_part.details a"));
static KEYWORD_LINK: LazyLock<Selector> = LazyLock::new(|| css(".itemTagsPosition .inner a"));

const MODEL_PATH_PREFIX: &str = "/model/";
const SIZE_MARKER_CLASS_PREFIX: &str = "mod-marker_";
const BULLET: &str = "• ";
const BULLET_SEPARATOR: &str = "\r\n";

/// Breadcrumb path and the model code carried by its last link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Entry texts after the root, joined with `" / "`.
    pub path: String,
    /// Last entry's `href`, with `/model/` and the trailing `/` removed
    /// when it points at a model page.
    pub model: String,
}

/// Trimmed text of a single element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Concatenated text of every matched element, trimmed once at the ends.
pub(crate) fn joined_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Trimmed value of `attr` on the first matched element, or `""`.
pub(crate) fn first_attr<'a>(
    mut elements: impl Iterator<Item = ElementRef<'a>>,
    attr: &str,
) -> String {
    elements
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_owned())
        .unwrap_or_default()
}

#[must_use]
pub fn breadcrumb(doc: &Html) -> Breadcrumb {
    let entries: Vec<ElementRef<'_>> = doc.select(&BREADCRUMB_LINK).skip(1).collect();
    let Some(last) = entries.last() else {
        return Breadcrumb::default();
    };

    let path = entries
        .iter()
        .map(|entry| element_text(*entry))
        .collect::<Vec<_>>()
        .join(" / ");

    let href = last.value().attr("href").unwrap_or_default();
    let model = match href.trim().strip_prefix(MODEL_PATH_PREFIX) {
        Some(code) => code.strip_suffix('/').unwrap_or(code).to_owned(),
        None => href.to_owned(),
    };

    Breadcrumb { path, model }
}

#[must_use]
pub fn category(doc: &Html) -> String {
    joined_text(doc.select(&CATEGORY))
}

#[must_use]
pub fn name(doc: &Html) -> String {
    joined_text(doc.select(&NAME))
}

/// Price digits with `,` thousands separators removed, e.g. `"12800"`.
#[must_use]
pub fn price(doc: &Html) -> String {
    joined_text(doc.select(&PRICE)).replace(',', "")
}

/// Size labels in document order.
#[must_use]
pub fn available_sizes(doc: &Html) -> Vec<String> {
    doc.select(&SIZE_BUTTON).map(element_text).collect()
}

/// Reads the size-fit marker position.
///
/// The marker element only carries a generated class such as
/// `mod-marker_3_5`; its horizontal offset lives in an inline stylesheet
/// rule elsewhere in the page, so the rule is looked up in the raw body.
/// Returns `"Appropriate: <percent>%"` or `""`.
#[must_use]
pub fn sense_of_size(doc: &Html, raw_body: &str) -> String {
    let classes = first_attr(doc.select(&SIZE_MARKER), "class");
    let Some(marker_class) = classes
        .split_whitespace()
        .find(|class| class.starts_with(SIZE_MARKER_CLASS_PREFIX))
    else {
        return String::new();
    };

    marker_offset(raw_body, marker_class)
        .map(|percent| format!("Appropriate: {percent}%"))
        .unwrap_or_default()
}

/// Finds `.bar .marker.<class>{...left:<n>%;...}` in `raw_body` and returns `<n>`.
fn marker_offset(raw_body: &str, marker_class: &str) -> Option<String> {
    let pattern = format!(
        r"\.bar \.marker\.{}\{{[^}}]*left:(\d+(\.\d+)?)%;",
        regex::escape(marker_class)
    );
    let rule = Regex::new(&pattern).ok()?;
    let captures = rule.captures(raw_body)?;
    Some(captures.get(1)?.as_str().trim().to_owned())
}

#[must_use]
pub fn description(doc: &Html) -> DescriptionDetails {
    let itemization = doc
        .select(&FEATURE_ITEM)
        .map(|item| format!("{BULLET}{}", element_text(item)))
        .collect::<Vec<_>>()
        .join(BULLET_SEPARATOR);

    DescriptionDetails {
        title: joined_text(doc.select(&FEATURE_TITLE)),
        general: joined_text(doc.select(&DESCRIPTION_BODY)),
        itemization,
    }
}

#[must_use]
pub fn special_function(doc: &Html) -> String {
    let title = joined_text(doc.select(&SPECIAL_FUNCTION_LINK));
    let text = joined_text(doc.select(&SPECIAL_FUNCTION));
    combine_special_function(&title, &text)
}

/// Merges the feature link text with its surrounding paragraph.
///
/// The paragraph text starts with the link text in the page markup, so the
/// link text is stripped from its front before combining.
#[must_use]
pub fn combine_special_function(title: &str, text: &str) -> String {
    let title = title.trim();
    let text = text.trim();
    let description = text.strip_prefix(title).unwrap_or(text).trim();

    match (title.is_empty(), description.is_empty()) {
        (false, false) => format!("[ {title} ] {description}"),
        (false, true) => title.to_owned(),
        (true, false) => description.to_owned(),
        (true, true) => String::new(),
    }
}

/// Tag link texts in document order.
#[must_use]
pub fn keywords(doc: &Html) -> Vec<String> {
    doc.select(&KEYWORD_LINK).map(element_text).collect()
}

#[cfg(test)]
#[path = "selectors_test.rs"]
mod tests;

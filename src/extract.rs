/// Product field extraction: selector fallback and number cleanup

use std::sync::LazyLock;

use regex::Regex;

use crate::page::PageDocument;
use crate::site::SiteProfile;
use crate::snapshot::{NOT_FOUND, ProductSnapshot};

// ASCII digits only, the page's numbers never use other scripts
static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

static BRACKET_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"【.*?】").unwrap());

/// Trimmed text of the first candidate that matches with non-empty text,
/// or the sentinel when none does
pub fn pick_first_match<D, S>(doc: &D, candidates: &[S]) -> String
where
    D: PageDocument + ?Sized,
    S: AsRef<str>,
{
    candidates
        .iter()
        .filter_map(|selector| doc.select_text(selector.as_ref()))
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

/// Strip thousands separators and glue every number run together.
///
/// Known quirk: "3 colors, 99 left" becomes "399". Pages put one number in
/// each field node, and callers rely on the glued form staying stable.
pub fn extract_digits(text: &str) -> String {
    if text.is_empty() || text == NOT_FOUND {
        return NOT_FOUND.to_string();
    }

    let cleaned = text.replace(',', "");
    let digits: String = NUMBER_RUN
        .find_iter(&cleaned)
        .map(|m| m.as_str())
        .collect();

    if digits.is_empty() {
        NOT_FOUND.to_string()
    } else {
        digits
    }
}

/// Page title with every 【...】 tag removed
pub fn clean_page_title(title: &str) -> String {
    let cleaned = BRACKET_TAG.replace_all(title, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        NOT_FOUND.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Currency-prefixed price, or the sentinel
pub fn format_price(raw: &str, currency: &str) -> String {
    if raw == NOT_FOUND {
        return NOT_FOUND.to_string();
    }
    match extract_digits(raw) {
        digits if digits == NOT_FOUND => digits,
        digits => format!("{}{}", currency, digits),
    }
}

/// Capture a snapshot of the product fields in `doc`
pub fn collect<D>(doc: &D, site: &SiteProfile, captured_at: &str) -> ProductSnapshot
where
    D: PageDocument + ?Sized,
{
    let title = match pick_first_match(doc, &site.title_selectors) {
        title if title == NOT_FOUND => clean_page_title(&doc.title()),
        title => title,
    };

    let raw_price = pick_first_match(doc, &site.price_selectors);
    let rating = pick_first_match(doc, &site.rating_selectors);
    let raw_comments = pick_first_match(doc, &site.comment_selectors);

    let url = doc.url();
    let is_product_page = site.is_product_page(&url);

    ProductSnapshot {
        title,
        price: format_price(&raw_price, &site.currency),
        rating,
        comments: extract_digits(&raw_comments),
        url,
        timestamp: captured_at.to_string(),
        is_product_page,
    }
}

/// Data structures for product snapshots
use serde::{Deserialize, Serialize};

/// In-band marker for a field that could not be extracted
pub const NOT_FOUND: &str = "未找到";

fn not_found() -> String {
    NOT_FOUND.to_string()
}

/// One capture of the product fields on a page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(default = "not_found")]
    pub title: String,
    #[serde(default = "not_found")]
    pub price: String,
    #[serde(default = "not_found")]
    pub rating: String,
    #[serde(default = "not_found")]
    pub comments: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub is_product_page: bool,
}

/// Information about the active browser tab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }

    /// Id and address, only when both are usable
    pub fn target(&self) -> Option<(i32, &str)> {
        match (self.id, self.url.as_deref()) {
            (Some(id), Some(url)) if id != 0 && !url.is_empty() => Some((id, url)),
            _ => None,
        }
    }
}

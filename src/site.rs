/// Target site description and address checks
use regex::Regex;

/// Selectors and address rules for one e-commerce site
///
/// Each selector list is ordered by how often the layout shows up on live
/// pages, most common first. Promotional pages and A/B layouts move the
/// fields around, so the later entries are fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProfile {
    pub domain: String,
    pub currency: String,
    pub title_selectors: Vec<String>,
    pub price_selectors: Vec<String>,
    pub rating_selectors: Vec<String>,
    pub comment_selectors: Vec<String>,
}

fn owned(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| s.to_string()).collect()
}

impl SiteProfile {
    /// Profile with the default selector lists for the given root domain
    pub fn new(domain: &str) -> SiteProfile {
        SiteProfile {
            domain: domain.trim().to_lowercase(),
            currency: "¥".to_string(),
            title_selectors: owned(&[".sku-name", ".itemInfo-wrap .sku-name", ".p-name h1"]),
            price_selectors: owned(&[
                ".summary-price .p-price .price",
                ".summary-price .p-price span",
                ".p-price .price",
                ".J-p-123456",
                ".price",
            ]),
            rating_selectors: owned(&[
                ".comment-info .percent-con",
                ".comment-info .score",
                ".f-s-1",
                ".tag-list .percent",
            ]),
            comment_selectors: owned(&[
                "#comment-count .count",
                "#comment-count",
                ".J-comment-count",
                ".comment-item .count",
            ]),
        }
    }

    pub fn jd() -> SiteProfile {
        SiteProfile::new("jd.com")
    }

    /// True if the address looks like `item.<domain>/<digits>.html`
    pub fn is_product_page(&self, url: &str) -> bool {
        let pattern = format!(r"item\.{}/[0-9]+\.html", regex::escape(&self.domain));
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(url),
            Err(e) => {
                log::warn!("Invalid product page pattern for {}: {}", self.domain, e);
                false
            }
        }
    }

    /// Loose membership check used before messaging a tab
    pub fn owns(&self, url: &str) -> bool {
        !self.domain.is_empty() && url.contains(&self.domain)
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::jd()
    }
}

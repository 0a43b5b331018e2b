/// Read-only views of a loaded page
use scraper::{Html, Selector};

/// The parts of a document the extractor reads
pub trait PageDocument {
    /// Text content of the first element matching `selector`.
    /// An unparsable selector matches nothing.
    fn select_text(&self, selector: &str) -> Option<String>;

    /// The document title as the browser reports it
    fn title(&self) -> String;

    /// The page address
    fn url(&self) -> String;
}

/// A page parsed from an HTML string
pub struct HtmlPage {
    document: Html,
    url: String,
}

impl HtmlPage {
    pub fn parse(html: &str, url: &str) -> HtmlPage {
        HtmlPage {
            document: Html::parse_document(html),
            url: url.to_string(),
        }
    }
}

impl PageDocument for HtmlPage {
    fn select_text(&self, selector: &str) -> Option<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(e) => {
                log::debug!("Skipping selector {:?}: {:?}", selector, e);
                return None;
            }
        };
        self.document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>())
    }

    fn title(&self) -> String {
        // Browsers collapse whitespace in document.title
        self.select_text("title")
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}

/// The document the content script is running in
pub struct LiveDocument {
    document: web_sys::Document,
    location: web_sys::Location,
}

impl LiveDocument {
    pub fn current() -> Option<LiveDocument> {
        let window = web_sys::window()?;
        Some(LiveDocument {
            document: window.document()?,
            location: window.location(),
        })
    }
}

impl PageDocument for LiveDocument {
    fn select_text(&self, selector: &str) -> Option<String> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.text_content())
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn url(&self) -> String {
        self.location.href().unwrap_or_default()
    }
}

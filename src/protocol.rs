/// Messages exchanged between the popup and the content script

use serde::{Deserialize, Serialize};

use crate::extract::collect;
use crate::page::PageDocument;
use crate::site::SiteProfile;
use crate::snapshot::ProductSnapshot;

/// Requests the popup can send to a tab
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "GET_PRODUCT_DATA")]
    GetProductData,
}

/// Answer one incoming message. Anything that is not a known request gets
/// no reply, so other listeners in the page can still answer it.
pub fn respond<D, E>(
    message: Result<Request, E>,
    doc: &D,
    site: &SiteProfile,
    captured_at: &str,
) -> Option<ProductSnapshot>
where
    D: PageDocument + ?Sized,
    E: std::fmt::Debug,
{
    match message {
        Ok(Request::GetProductData) => {
            let snapshot = collect(doc, site, captured_at);
            log::debug!(
                "Collected snapshot for {} (product page: {})",
                snapshot.url,
                snapshot.is_product_page
            );
            Some(snapshot)
        }
        Err(e) => {
            log::debug!("Ignoring message: {:?}", e);
            None
        }
    }
}

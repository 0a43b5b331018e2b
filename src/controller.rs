/// Popup-side orchestration: find the tab, ask it for a snapshot, report

use thiserror::Error;

use crate::protocol::Request;
use crate::site::SiteProfile;
use crate::snapshot::{NOT_FOUND, ProductSnapshot, TabInfo};

/// Browser capabilities the popup needs. Errors are bridge messages.
#[allow(async_fn_in_trait)]
pub trait TabChannel {
    /// The active tab of the current window, if any
    async fn active_tab(&self) -> Result<Option<TabInfo>, String>;

    /// Send `request` to the tab's content script and wait for one reply
    async fn request_snapshot(
        &self,
        tab_id: i32,
        request: &Request,
    ) -> Result<Option<ProductSnapshot>, String>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("no usable active tab")]
    NoTab,
    #[error("active tab is not on {0}")]
    WrongSite(String),
    #[error("content script did not respond")]
    NoResponse,
    #[error("fetch failed: {0}")]
    Failed(String),
}

/// Run one fetch against the active tab
pub async fn fetch_product_data<C: TabChannel>(
    channel: &C,
    site: &SiteProfile,
) -> Result<ProductSnapshot, FetchError> {
    let tab = channel.active_tab().await.map_err(FetchError::Failed)?;
    let tab = tab.ok_or(FetchError::NoTab)?;
    let (tab_id, url) = tab.target().ok_or(FetchError::NoTab)?;

    if !site.owns(url) {
        return Err(FetchError::WrongSite(site.domain.clone()));
    }

    match channel.request_snapshot(tab_id, &Request::GetProductData).await {
        Ok(Some(snapshot)) => Ok(snapshot),
        Ok(None) => Err(FetchError::NoResponse),
        Err(e) => {
            // No content script in the tab rejects the send
            log::warn!("Message to tab {} failed: {}", tab_id, e);
            Err(FetchError::NoResponse)
        }
    }
}

/// The four text regions of the popup
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub comments: String,
}

fn or_not_found(value: &str) -> String {
    if value.is_empty() {
        NOT_FOUND.to_string()
    } else {
        value.to_string()
    }
}

impl DisplayFields {
    pub fn from_snapshot(snapshot: &ProductSnapshot) -> DisplayFields {
        DisplayFields {
            title: or_not_found(&snapshot.title),
            price: or_not_found(&snapshot.price),
            rating: or_not_found(&snapshot.rating),
            comments: or_not_found(&snapshot.comments),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Requesting,
    Rendered {
        fields: DisplayFields,
        is_product_page: bool,
        timestamp: String,
    },
    NoTab,
    WrongSite(String),
    NoResponse,
    Failed(String),
}

impl From<Result<ProductSnapshot, FetchError>> for FetchState {
    fn from(result: Result<ProductSnapshot, FetchError>) -> Self {
        match result {
            Ok(snapshot) => FetchState::Rendered {
                fields: DisplayFields::from_snapshot(&snapshot),
                is_product_page: snapshot.is_product_page,
                timestamp: snapshot.timestamp,
            },
            Err(FetchError::NoTab) => FetchState::NoTab,
            Err(FetchError::WrongSite(domain)) => FetchState::WrongSite(domain),
            Err(FetchError::NoResponse) => FetchState::NoResponse,
            Err(FetchError::Failed(reason)) => FetchState::Failed(reason),
        }
    }
}

impl FetchState {
    /// Fields to show; terminal states other than Rendered keep the old ones
    pub fn fields(&self) -> Option<&DisplayFields> {
        match self {
            FetchState::Rendered { fields, .. } => Some(fields),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, FetchState::Requesting)
    }

    /// Status line shown under the fields
    pub fn status_text(&self, site: &SiteProfile) -> String {
        match self {
            FetchState::Idle => String::new(),
            FetchState::Requesting => "正在抓取数据，请稍候...".to_string(),
            FetchState::Rendered {
                is_product_page: true,
                timestamp,
                ..
            } => format!("最近更新：{}", timestamp),
            FetchState::Rendered { .. } => format!(
                "当前页面不是标准京东商品详情页（item.{}/...），数据可能不完整。",
                site.domain
            ),
            FetchState::NoTab => "无法获取当前标签页。".to_string(),
            FetchState::WrongSite(domain) => {
                format!("请先打开京东商品页面（{}）再使用。", domain)
            }
            FetchState::NoResponse => "未获取到数据。请刷新商品页面后重试。".to_string(),
            FetchState::Failed(_) => "抓取失败：请确认页面已完全加载，或刷新后重试。".to_string(),
        }
    }
}

/// Fetch and fold the outcome into a terminal state, logging it
pub async fn refresh<C: TabChannel>(channel: &C, site: &SiteProfile) -> FetchState {
    let result = fetch_product_data(channel, site).await;
    match &result {
        Ok(snapshot) => log::debug!("Rendered snapshot from {}", snapshot.url),
        Err(FetchError::Failed(e)) => log::error!("抓取失败：{}", e),
        Err(e) => log::info!("Fetch ended: {}", e),
    }
    FetchState::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct FakeChannel {
        tab: Result<Option<TabInfo>, String>,
        reply: Result<Option<ProductSnapshot>, String>,
        sent: Cell<usize>,
        last_request: RefCell<Option<(i32, Request)>>,
    }

    impl FakeChannel {
        fn new(
            tab: Result<Option<TabInfo>, String>,
            reply: Result<Option<ProductSnapshot>, String>,
        ) -> FakeChannel {
            FakeChannel {
                tab,
                reply,
                sent: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl TabChannel for FakeChannel {
        async fn active_tab(&self) -> Result<Option<TabInfo>, String> {
            self.tab.clone()
        }

        async fn request_snapshot(
            &self,
            tab_id: i32,
            request: &Request,
        ) -> Result<Option<ProductSnapshot>, String> {
            self.sent.set(self.sent.get() + 1);
            *self.last_request.borrow_mut() = Some((tab_id, *request));
            self.reply.clone()
        }
    }

    fn snapshot(is_product_page: bool) -> ProductSnapshot {
        ProductSnapshot {
            title: "Widget Pro".to_string(),
            price: "¥1299.00".to_string(),
            rating: NOT_FOUND.to_string(),
            comments: "2345".to_string(),
            url: "https://item.jd.com/1.html".to_string(),
            timestamp: "2024/10/28 10:30:00".to_string(),
            is_product_page,
        }
    }

    fn jd_tab() -> Result<Option<TabInfo>, String> {
        Ok(Some(TabInfo::new(7, "https://item.jd.com/1.html")))
    }

    #[test]
    fn test_rendered_product_page() {
        let channel = FakeChannel::new(jd_tab(), Ok(Some(snapshot(true))));
        let site = SiteProfile::jd();

        let state = block_on(refresh(&channel, &site));

        assert_eq!(state.status_text(&site), "最近更新：2024/10/28 10:30:00");
        let fields = state.fields().unwrap();
        assert_eq!(fields.title, "Widget Pro");
        assert_eq!(fields.rating, NOT_FOUND);
        assert_eq!(*channel.last_request.borrow(), Some((7, Request::GetProductData)));
    }

    #[test]
    fn test_rendered_non_product_page() {
        let channel = FakeChannel::new(jd_tab(), Ok(Some(snapshot(false))));
        let site = SiteProfile::jd();

        let state = block_on(refresh(&channel, &site));

        assert_eq!(state.fields().unwrap().price, "¥1299.00");
        assert_eq!(
            state.status_text(&site),
            "当前页面不是标准京东商品详情页（item.jd.com/...），数据可能不完整。"
        );
    }

    #[test]
    fn test_wrong_site_sends_nothing() {
        let tab = Ok(Some(TabInfo::new(3, "https://www.taobao.com/item/1")));
        let channel = FakeChannel::new(tab, Ok(Some(snapshot(true))));
        let site = SiteProfile::jd();

        let state = block_on(refresh(&channel, &site));

        assert_eq!(state, FetchState::WrongSite("jd.com".to_string()));
        assert_eq!(state.status_text(&site), "请先打开京东商品页面（jd.com）再使用。");
        assert_eq!(channel.sent.get(), 0);
    }

    #[test]
    fn test_no_tab() {
        let site = SiteProfile::jd();
        for tab in [Ok(None), Ok(Some(TabInfo { id: None, url: Some("https://jd.com".to_string()) })), Ok(Some(TabInfo::new(1, "")))] {
            let channel = FakeChannel::new(tab, Ok(Some(snapshot(true))));
            let state = block_on(refresh(&channel, &site));
            assert_eq!(state, FetchState::NoTab);
            assert_eq!(state.status_text(&site), "无法获取当前标签页。");
            assert_eq!(channel.sent.get(), 0);
        }
    }

    #[test]
    fn test_no_response() {
        let site = SiteProfile::jd();
        let empty = FakeChannel::new(jd_tab(), Ok(None));
        let unreachable = FakeChannel::new(
            jd_tab(),
            Err("Could not establish connection. Receiving end does not exist.".to_string()),
        );

        for channel in [empty, unreachable] {
            let state = block_on(refresh(&channel, &site));
            assert_eq!(state, FetchState::NoResponse);
            assert_eq!(state.status_text(&site), "未获取到数据。请刷新商品页面后重试。");
            assert!(state.fields().is_none());
        }
    }

    #[test]
    fn test_tab_query_failure() {
        let channel = FakeChannel::new(Err("tabs API unavailable".to_string()), Ok(None));

        let result = block_on(fetch_product_data(&channel, &SiteProfile::jd()));

        assert_eq!(result, Err(FetchError::Failed("tabs API unavailable".to_string())));
        assert_eq!(
            FetchState::from(result).status_text(&SiteProfile::jd()),
            "抓取失败：请确认页面已完全加载，或刷新后重试。"
        );
    }

    #[test]
    fn test_display_fields_fill_empty_values() {
        let mut partial = snapshot(true);
        partial.title = String::new();
        partial.comments = String::new();

        let fields = DisplayFields::from_snapshot(&partial);

        assert_eq!(fields.title, NOT_FOUND);
        assert_eq!(fields.comments, NOT_FOUND);
        assert_eq!(fields.price, "¥1299.00");
    }

    #[test]
    fn test_busy_only_while_requesting() {
        assert!(FetchState::Requesting.is_busy());
        assert!(!FetchState::Idle.is_busy());
        assert!(!FetchState::NoResponse.is_busy());
        assert_eq!(FetchState::Requesting.status_text(&SiteProfile::jd()), "正在抓取数据，请稍候...");
    }
}

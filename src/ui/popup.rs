/// Popup UI for the product snapshot extension

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::controller::{DisplayFields, FetchState, TabChannel, refresh};
use crate::protocol::Request;
use crate::site::SiteProfile;
use crate::snapshot::{NOT_FOUND, ProductSnapshot, TabInfo};
use crate::ui::components::FieldRow;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;
}

/// `chrome.tabs` through the popup bridge
pub struct ChromeTabs;

impl TabChannel for ChromeTabs {
    async fn active_tab(&self) -> Result<Option<TabInfo>, String> {
        let tab_js = getActiveTab()
            .await
            .map_err(|e| format!("Failed to query tabs: {:?}", e))?;

        serde_wasm_bindgen::from_value(tab_js).map_err(|e| format!("Failed to parse tab: {:?}", e))
    }

    async fn request_snapshot(
        &self,
        tab_id: i32,
        request: &Request,
    ) -> Result<Option<ProductSnapshot>, String> {
        let message = serde_wasm_bindgen::to_value(request)
            .map_err(|e| format!("Failed to serialize: {:?}", e))?;

        let response = sendTabMessage(tab_id, message)
            .await
            .map_err(|e| format!("Failed to send message: {:?}", e))?;

        serde_wasm_bindgen::from_value(response)
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }
}

fn start_fetch(state: UseStateHandle<FetchState>, fields: UseStateHandle<Option<DisplayFields>>) {
    state.set(FetchState::Requesting);

    // A later fetch simply overwrites whatever an earlier one rendered
    spawn_local(async move {
        let outcome = refresh(&ChromeTabs, &SiteProfile::jd()).await;
        if let Some(rendered) = outcome.fields() {
            fields.set(Some(rendered.clone()));
        }
        state.set(outcome);
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| FetchState::Idle);
    let fields = use_state(|| None::<DisplayFields>);

    // Fetch once when the popup opens
    {
        let state = state.clone();
        let fields = fields.clone();
        use_effect_with((), move |_| {
            start_fetch(state, fields);
            || ()
        });
    }

    let on_refresh = {
        let state = state.clone();
        let fields = fields.clone();
        Callback::from(move |_: MouseEvent| {
            start_fetch(state.clone(), fields.clone());
        })
    };

    let site = SiteProfile::jd();
    let status = state.status_text(&site);
    let shown = (*fields).clone().unwrap_or_else(|| DisplayFields {
        title: NOT_FOUND.to_string(),
        price: NOT_FOUND.to_string(),
        rating: NOT_FOUND.to_string(),
        comments: NOT_FOUND.to_string(),
    });

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"京东竞品分析助手"}</h1>

            <div class="fields-box">
                <FieldRow label="商品标题" value={shown.title} />
                <FieldRow label="价格" value={shown.price} />
                <FieldRow label="评分" value={shown.rating} />
                <FieldRow label="评论数" value={shown.comments} />
            </div>

            <Button onclick={on_refresh} variant={ButtonVariant::Primary} block={true}>
                {"🔄 刷新数据"}
            </Button>

            // Status display
            {match &*state {
                FetchState::Idle => html! {},
                FetchState::Requesting => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{status}</p>
                    </div>
                },
                FetchState::Rendered { is_product_page: true, .. } => html! {
                    <p class="status-text">{status}</p>
                },
                FetchState::Rendered { .. } | FetchState::WrongSite(_) | FetchState::NoTab => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Warning} title={status} inline={true}>
                        </Alert>
                    </div>
                },
                FetchState::NoResponse | FetchState::Failed(_) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={status} inline={true}>
                        </Alert>
                    </div>
                },
            }}

            <p class="footer-popup">
                {"JD Product Lens v0.1.0"}
            </p>
        </div>
    }
}

/// Content script entry: answers snapshot requests from the popup

use wasm_bindgen::prelude::*;

use crate::page::LiveDocument;
use crate::protocol::{Request, respond};
use crate::site::SiteProfile;

// Import JS bridge functions
#[wasm_bindgen(module = "/content.js")]
extern "C" {
    fn addMessageHandler(handler: &js_sys::Function);
}

/// Register the runtime message listener for this page
pub fn install() {
    let site = SiteProfile::jd();

    let handler = Closure::wrap(Box::new(move |message: JsValue| -> JsValue {
        let request = serde_wasm_bindgen::from_value::<Request>(message);

        let Some(doc) = LiveDocument::current() else {
            log::warn!("No document available in this context");
            return JsValue::UNDEFINED;
        };

        match respond(request, &doc, &site, &capture_time()) {
            Some(snapshot) => serde_wasm_bindgen::to_value(&snapshot).unwrap_or_else(|e| {
                log::warn!("Failed to serialize snapshot: {:?}", e);
                JsValue::UNDEFINED
            }),
            None => JsValue::UNDEFINED,
        }
    }) as Box<dyn Fn(JsValue) -> JsValue>);

    addMessageHandler(handler.as_ref().unchecked_ref());
    // The listener lives as long as the page
    handler.forget();

    log::info!("Product data listener installed");
}

fn capture_time() -> String {
    js_sys::Date::new_0()
        .to_locale_string("zh-CN", &JsValue::UNDEFINED)
        .into()
}

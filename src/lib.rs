/// JD Product Lens - Chrome Extension for product page snapshots
/// Built with Rust + WASM + Yew

pub mod controller;
pub mod extract;
pub mod page;
pub mod protocol;
pub mod site;
pub mod snapshot;
mod content;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the page check for JavaScript access
#[wasm_bindgen]
pub fn is_product_page(url: &str) -> bool {
    site::SiteProfile::jd().is_product_page(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Answer snapshot requests from the popup in this page
#[wasm_bindgen]
pub fn start_content_script() {
    content::install();
}

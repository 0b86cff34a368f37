mod app;
mod core;
mod pages;

use app::App;
use leptos::*;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    mount_to_body(|| view! { <App/> });
}

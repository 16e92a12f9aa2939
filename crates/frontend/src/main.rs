mod api;
mod components;
mod coords;
mod hash;
mod pages;

use dioxus::prelude::*;

use pages::viewer::Viewer;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Viewer {}
    }
}

fn main() {
    launch(App);
}

use dioxus::prelude::*;

use slippyview_shared::models::LatLng;

/// What the last map click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickInfo {
    pub point: LatLng,
    pub tile_url: String,
}

#[component]
pub fn DebugPanel(click_info: Signal<Option<ClickInfo>>) -> Element {
    let info = click_info.read().clone();

    rsx! {
        div { class: "panel",
            h3 { "Debug" }
            if let Some(info) = info {
                p { class: "coord-info", "lat: {info.point.lat}, lng: {info.point.lng}" }
                a { class: "tile-link", href: "{info.tile_url}", "{info.tile_url}" }
            } else {
                p { style: "color: var(--text-dim); font-size: 13px;",
                    "Click the map to inspect the tile under the cursor."
                }
            }
        }
    }
}

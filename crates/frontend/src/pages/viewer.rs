use dioxus::prelude::*;

use slippyview_shared::fragment;
use slippyview_shared::models::{GeoBounds, LatLng, ViewState};
use slippyview_shared::sync::{self, ViewSync};
use slippyview_shared::viewstate;

use crate::api;
use crate::components::debug_panel::{ClickInfo, DebugPanel};
use crate::components::map_view::{MapView, ZOOM_MAX, ZOOM_MIN};
use crate::components::style_picker::StylePicker;
use crate::coords;
use crate::hash;

/// Zoom used when the fragment carries no saved view.
const DEFAULT_ZOOM: f64 = 13.0;

const NO_DATASETS: &str =
    "No datasets found. Have you imported at least one dataset into a supported database or file?";

#[component]
pub fn Viewer() -> Element {
    let info_resource = use_resource(|| api::fetch_info());

    // View state signals
    let mut center = use_signal(|| LatLng { lat: 0.0, lng: 0.0 });
    let mut zoom = use_signal(|| DEFAULT_ZOOM);
    let style_id = use_signal(|| None::<String>);
    let mut max_bounds = use_signal(|| None::<GeoBounds>);
    let mut view_sync = use_signal(ViewSync::default);
    let mut sync_error = use_signal(|| None::<String>);
    let mut click_info = use_signal(|| None::<ClickInfo>);
    let mut initialized = use_signal(|| false);

    // React to address-bar edits for the lifetime of the page. Writes we
    // made ourselves come back through here and are ignored.
    use_effect(move || {
        hash::on_fragment_change(move |fragment_str| {
            match view_sync.write().apply_fragment(&fragment_str) {
                Ok(Some(view)) => {
                    let point = LatLng {
                        lat: view.lat,
                        lng: view.lng,
                    };
                    center.set(coords::clamp_center(point, *max_bounds.read()));
                    zoom.set(view.zoom.clamp(ZOOM_MIN, ZOOM_MAX));
                    sync_error.set(None);
                }
                Ok(None) => {}
                Err(e) => sync_error.set(Some(e.to_string())),
            }
        });
    });

    let on_view_settled = move |_| {
        let point = *center.read();
        let view = ViewState {
            zoom: *zoom.read(),
            lat: point.lat,
            lng: point.lng,
        };
        // Merge against the live fragment so unrelated keys survive
        let current = hash::read_fragment();
        if let Some(new_fragment) = view_sync.write().record_view(view, &current) {
            hash::write_fragment(&new_fragment);
        }
    };

    let on_map_click = move |point: LatLng| {
        let tile_zoom = zoom.read().round() as u8;
        let style = style_id.read().clone();
        let query: Vec<(&str, &str)> = match style.as_deref() {
            Some(id) => vec![("styleId", id)],
            None => Vec::new(),
        };
        let (_, tile_url) = sync::click_tile(api::TILE_URL_TEMPLATE, point, tile_zoom, &query);
        click_info.set(Some(ClickInfo { point, tile_url }));
    };

    let body = match &*info_resource.read() {
        None => rsx! {
            div { class: "app",
                div { class: "loading", "Loading…" }
            }
        },
        Some(Err(reason)) => rsx! {
            div { class: "app",
                div { class: "map-error", "failed to get bounds. Reason: \"{reason}\"" }
            }
        },
        Some(Ok(info)) if info.datasets.is_empty() => rsx! {
            div { class: "app",
                div { class: "map-error", "failed to get bounds. Reason: \"{NO_DATASETS}\"" }
            }
        },
        Some(Ok(info)) => {
            let bounds = info.datasets[0].bounds;

            // One-time view seed once server info is in: dataset bounds give
            // the default, a saved fragment view wins over it.
            if !*initialized.read() {
                initialized.set(true);
                let geo = bounds.to_geo();
                max_bounds.set(Some(geo));

                let fallback = bounds.center();
                let mut start = ViewState {
                    zoom: DEFAULT_ZOOM,
                    lat: fallback.lat,
                    lng: fallback.lng,
                };
                match viewstate::decode(&fragment::parse(&hash::read_fragment())) {
                    Ok(Some(saved)) => start = saved,
                    Ok(None) => {}
                    Err(e) => sync_error.set(Some(e.to_string())),
                }
                let point = LatLng {
                    lat: start.lat,
                    lng: start.lng,
                };
                center.set(coords::clamp_center(point, Some(geo)));
                zoom.set(start.zoom.clamp(ZOOM_MIN, ZOOM_MAX));
            }

            rsx! {
                div { class: "app",
                    div { class: "header",
                        h1 { "Slippy Map Viewer" }
                    }

                    div { class: "sidebar",
                        StylePicker {
                            style_ids: info.style.style_ids.clone(),
                            default_style_id: info.style.default_style_id.clone(),
                            style_id: style_id,
                        }

                        DebugPanel { click_info: click_info }

                        if let Some(err) = sync_error.read().clone() {
                            div { class: "panel sync-error",
                                p { "{err}" }
                            }
                        }
                    }

                    MapView {
                        center: center,
                        zoom: zoom,
                        style_id: style_id,
                        max_bounds: *max_bounds.read(),
                        on_view_settled: on_view_settled,
                        on_map_click: on_map_click,
                    }
                }
            }
        }
    };
    body
}

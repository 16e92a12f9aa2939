use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use slippyview_shared::models::{GeoBounds, LatLng, TileCoord};
use slippyview_shared::tile;

use crate::api;
use crate::coords;

const MAP_CONTAINER_ID: &str = "slippy-map-container";

/// Drag movement below this many pixels is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

pub const ZOOM_MIN: f64 = 0.0;
pub const ZOOM_MAX: f64 = 21.0;
const ZOOM_STEP: f64 = 1.0;

/// Wheel zoom bursts settle after this long without further input.
const SETTLE_DELAY_MS: u32 = 200;

/// Viewport size used before the container is first measured.
const FALLBACK_WIDTH: f64 = 1024.0;
const FALLBACK_HEIGHT: f64 = 768.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

// ---------------------------------------------------------------------------
// Zoom / tile layout (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Next zoom level for a wheel movement. Scrolling zooms in whole steps
/// from the nearest integer level, so fractional levels restored from the
/// fragment snap back onto the ladder.
fn wheel_zoom_target(current: f64, delta_y: f64) -> f64 {
    let step = if delta_y < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
    (current.round() + step).clamp(ZOOM_MIN, ZOOM_MAX)
}

/// A tile to render: fetch URL and position relative to the container's
/// top-left corner.
struct PositionedTile {
    url: String,
    left: f64,
    top: f64,
}

/// Lay out every tile covering the viewport, row by row within columns.
fn visible_tiles(
    center: LatLng,
    zoom: u8,
    width: f64,
    height: f64,
    template: &str,
    style_id: Option<&str>,
) -> Vec<PositionedTile> {
    let (min, max) = coords::visible_tile_range(center, zoom, width, height);
    let query: Vec<(&str, &str)> = match style_id {
        Some(id) => vec![("styleId", id)],
        None => Vec::new(),
    };

    let mut tiles = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            let coord = TileCoord { x, y, z: zoom };
            let (left, top) = coords::tile_screen_position(coord, center, width, height);
            tiles.push(PositionedTile {
                url: tile::tile_url(template, coord, &query),
                left,
                top,
            });
        }
    }
    tiles
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    center: Signal<LatLng>,
    zoom: Signal<f64>,
    style_id: Signal<Option<String>>,
    max_bounds: Option<GeoBounds>,
    on_view_settled: EventHandler<()>,
    on_map_click: EventHandler<LatLng>,
) -> Element {
    // Viewport size, re-measured once the container exists in the DOM.
    let mut viewport = use_signal(|| (FALLBACK_WIDTH, FALLBACK_HEIGHT));
    use_effect(move || {
        if let Some(rect) = container_rect() {
            viewport.set((rect.width(), rect.height()));
        }
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start_x = use_signal(|| 0.0_f64);
    let mut drag_start_y = use_signal(|| 0.0_f64);
    let mut drag_start_center = use_signal(|| LatLng { lat: 0.0, lng: 0.0 });

    // Generation counter for the settle timer: a newer wheel event
    // invalidates the pending notification.
    let mut settle_gen = use_signal(|| 0_u64);

    let mut schedule_settle = move || {
        let gen = *settle_gen.read() + 1;
        settle_gen.set(gen);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SETTLE_DELAY_MS).await;
            if *settle_gen.read() == gen {
                on_view_settled.call(());
            }
        });
    };

    // Shared by wheel and double-click: rezoom keeping the cursor's
    // geographic point fixed, then notify once the burst settles.
    let mut zoom_at = move |client_x: f64, client_y: f64, new_zoom: f64| {
        let old_zoom = *zoom.read();
        if (new_zoom - old_zoom).abs() < 1e-9 {
            return;
        }
        let Some(rect) = container_rect() else { return };
        let cx = client_x - rect.left();
        let cy = client_y - rect.top();

        let new_center = coords::zoom_center_at_cursor(
            *center.read(),
            old_zoom,
            new_zoom,
            cx,
            cy,
            rect.width(),
            rect.height(),
        );
        center.set(coords::clamp_center(new_center, max_bounds));
        zoom.set(new_zoom);
        schedule_settle();
    };

    let (width, height) = *viewport.read();
    let cur_center = *center.read();
    let cur_zoom = *zoom.read();
    let dragging = *is_dragging.read();

    // Tiles are addressed at the nearest integer level; the fragment may
    // carry a fractional zoom.
    let tile_zoom = cur_zoom.round().clamp(ZOOM_MIN, ZOOM_MAX) as u8;
    let style = style_id.read().clone();
    let tiles = visible_tiles(
        cur_center,
        tile_zoom,
        width,
        height,
        api::TILE_URL_TEMPLATE,
        style.as_deref(),
    );

    let container_class = if dragging {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                let new_zoom = wheel_zoom_target(*zoom.read(), delta_y);
                let client = evt.data().client_coordinates();
                zoom_at(client.x, client.y, new_zoom);
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only track drag/click for left mouse button
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start_x.set(client.x);
                drag_start_y.set(client.y);
                drag_start_center.set(*center.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let dx = client.x - *drag_start_x.read();
                let dy = client.y - *drag_start_y.read();

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let moved =
                        coords::pan_center(*drag_start_center.read(), *zoom.read(), dx, dy);
                    center.set(coords::clamp_center(moved, max_bounds));
                }
            },

            onmouseup: move |evt: Event<MouseData>| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);

                if !was_dragging {
                    return;
                }
                if was_drag {
                    on_view_settled.call(());
                } else {
                    // A mouseup without drag movement = a click
                    let client = evt.client_coordinates();
                    if let Some(geo) = coords::click_to_geo(
                        client.x,
                        client.y,
                        MAP_CONTAINER_ID,
                        *center.read(),
                        *zoom.read(),
                    ) {
                        on_map_click.call(geo);
                    }
                }
            },

            onmouseleave: move |_| {
                if *is_dragging.read() {
                    is_dragging.set(false);
                    if *did_drag.read() {
                        on_view_settled.call(());
                    }
                }
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let client = evt.client_coordinates();
                let new_zoom = wheel_zoom_target(*zoom.read(), -1.0);
                zoom_at(client.x, client.y, new_zoom);
            },

            for tile in tiles {
                img {
                    key: "{tile.url}",
                    class: "map-tile",
                    src: "{tile.url}",
                    style: "left: {tile.left}px; top: {tile.top}px;",
                    draggable: "false",
                }
            }

            div { class: "map-attribution",
                "© "
                a {
                    href: "https://www.openstreetmap.org/copyright",
                    target: "_blank",
                    "OpenStreetMap"
                }
                " contributors"
            }
        }
    }
}

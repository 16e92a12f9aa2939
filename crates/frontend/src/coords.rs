use slippyview_shared::models::{GeoBounds, LatLng, TileCoord};
use slippyview_shared::tile;

/// World-pixel position of the viewport's top-left corner for a view
/// centered on `center` at `zoom`.
///
/// Pure function: usable in unit tests (no web_sys dependency).
pub fn viewport_origin(center: LatLng, zoom: f64, width: f64, height: f64) -> (f64, f64) {
    let (cx, cy) = tile::project(center, zoom);
    (cx - width / 2.0, cy - height / 2.0)
}

/// Geographic point under a container-relative position.
pub fn screen_to_geo(
    container_x: f64,
    container_y: f64,
    center: LatLng,
    zoom: f64,
    width: f64,
    height: f64,
) -> LatLng {
    let (ox, oy) = viewport_origin(center, zoom, width, height);
    tile::unproject(ox + container_x, oy + container_y, zoom)
}

/// New center after dragging the content by (dx, dy) screen pixels.
/// Dragging the map east (positive dx) moves the center west.
pub fn pan_center(center: LatLng, zoom: f64, dx: f64, dy: f64) -> LatLng {
    let (cx, cy) = tile::project(center, zoom);
    tile::unproject(cx - dx, cy - dy, zoom)
}

/// New center so that the geographic point under the cursor stays put
/// when zooming from `old_zoom` to `new_zoom`.
pub fn zoom_center_at_cursor(
    center: LatLng,
    old_zoom: f64,
    new_zoom: f64,
    cursor_x: f64,
    cursor_y: f64,
    width: f64,
    height: f64,
) -> LatLng {
    let anchor = screen_to_geo(cursor_x, cursor_y, center, old_zoom, width, height);
    let (ax, ay) = tile::project(anchor, new_zoom);
    let off_x = cursor_x - width / 2.0;
    let off_y = cursor_y - height / 2.0;
    tile::unproject(ax - off_x, ay - off_y, new_zoom)
}

/// Tile range covering the viewport, via the geographic corners of the
/// visible area. The southeast corner is inclusive, so edge rows can be
/// clipped rather than missing.
pub fn visible_tile_range(
    center: LatLng,
    zoom: u8,
    width: f64,
    height: f64,
) -> (TileCoord, TileCoord) {
    let (ox, oy) = viewport_origin(center, zoom as f64, width, height);
    let nw = tile::unproject(ox, oy, zoom as f64);
    let se = tile::unproject(ox + width, oy + height, zoom as f64);
    let bounds = GeoBounds {
        north: nw.lat,
        south: se.lat,
        east: se.lng,
        west: nw.lng,
    };
    tile::bounds_to_tile_range(bounds, zoom)
}

/// Container-relative position of a tile's northwest corner.
pub fn tile_screen_position(
    coord: TileCoord,
    center: LatLng,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (ox, oy) = viewport_origin(center, coord.z as f64, width, height);
    (
        coord.x as f64 * tile::TILE_SIZE - ox,
        coord.y as f64 * tile::TILE_SIZE - oy,
    )
}

/// Clamp the center into the dataset bounds, when bounds are known.
pub fn clamp_center(center: LatLng, max_bounds: Option<GeoBounds>) -> LatLng {
    match max_bounds {
        Some(b) => LatLng {
            lat: center.lat.clamp(b.south, b.north),
            lng: center.lng.clamp(b.west, b.east),
        },
        None => center,
    }
}

/// Get container-relative click coordinates using web_sys, then convert
/// to the geographic point under the cursor.
pub fn click_to_geo(
    client_x: f64,
    client_y: f64,
    container_id: &str,
    center: LatLng,
    zoom: f64,
) -> Option<LatLng> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    let rect = element.get_bounding_client_rect();

    let container_x = client_x - rect.left();
    let container_y = client_y - rect.top();

    Some(screen_to_geo(
        container_x,
        container_y,
        center,
        zoom,
        rect.width(),
        rect.height(),
    ))
}

use std::f64::consts::PI;

use crate::models::{GeoBounds, LatLng, TileCoord};

/// Tile edge length in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web-Mercator world.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Project a geographic point to world-pixel space at a zoom level.
///
/// The world is a square of 256·2^zoom pixels per axis with (0, 0) at
/// the northwest corner (+85.051°, −180°). Latitude is clamped into the
/// projection's domain. Zoom is a float so the viewer can project at
/// fractional display zooms.
pub fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let world = TILE_SIZE * zoom.exp2();
    let lat_rad = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = world * (point.lng + 180.0) / 360.0;
    let y = world * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

/// Tile containing a geographic point at an integer zoom level: project
/// to world pixels, divide by the tile size, floor. Indices are clamped
/// into the grid so the poles and the antimeridian still address a tile.
pub fn geo_to_tile(point: LatLng, zoom: u8) -> TileCoord {
    let (px, py) = project(point, zoom as f64);
    let max_index = ((zoom as f64).exp2() - 1.0).max(0.0);

    TileCoord {
        x: (px / TILE_SIZE).floor().clamp(0.0, max_index) as u32,
        y: (py / TILE_SIZE).floor().clamp(0.0, max_index) as u32,
        z: zoom,
    }
}

/// Inverse of [`project`]: world pixels back to a geographic point.
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let world = TILE_SIZE * zoom.exp2();
    let lng = x / world * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y / world)).sinh().atan();
    LatLng {
        lat: lat_rad.to_degrees(),
        lng,
    }
}

/// Northwest corner of a tile (the inverse projection at the tile's
/// grid point).
pub fn tile_to_geo(coord: TileCoord) -> LatLng {
    unproject(
        coord.x as f64 * TILE_SIZE,
        coord.y as f64 * TILE_SIZE,
        coord.z as f64,
    )
}

/// Geographic bounding box of a tile: its NW corner and the NW corner of
/// its southeast neighbor.
pub fn tile_bounds(coord: TileCoord) -> GeoBounds {
    let nw = tile_to_geo(coord);
    let se = tile_to_geo(TileCoord {
        x: coord.x + 1,
        y: coord.y + 1,
        z: coord.z,
    });
    GeoBounds {
        north: nw.lat,
        south: se.lat,
        east: se.lng,
        west: nw.lng,
    }
}

/// Inclusive tile range covering a bounding box at a zoom level, taken
/// from the box's northwest and southeast corners. A degenerate box
/// still yields a valid (possibly single-tile) range.
pub fn bounds_to_tile_range(bounds: GeoBounds, zoom: u8) -> (TileCoord, TileCoord) {
    let nw = geo_to_tile(bounds.north_west(), zoom);
    let se = geo_to_tile(bounds.south_east(), zoom);

    let min = TileCoord {
        x: nw.x.min(se.x),
        y: nw.y.min(se.y),
        z: zoom,
    };
    let max = TileCoord {
        x: nw.x.max(se.x),
        y: nw.y.max(se.y),
        z: zoom,
    };
    (min, max)
}

/// Fill a `{z}`/`{x}`/`{y}` URL template and append query parameters.
pub fn tile_url(template: &str, coord: TileCoord, extra_query: &[(&str, &str)]) -> String {
    let mut url = template
        .replace("{z}", &coord.z.to_string())
        .replace("{x}", &coord.x.to_string())
        .replace("{y}", &coord.y.to_string());

    let mut sep = if url.contains('?') { '&' } else { '?' };
    for (key, value) in extra_query {
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(value);
        sep = '&';
    }
    url
}

/// URLs for every tile covering `bounds` at `zoom`.
pub fn tile_urls(
    template: &str,
    bounds: GeoBounds,
    zoom: u8,
    extra_query: &[(&str, &str)],
) -> Vec<String> {
    let (min, max) = bounds_to_tile_range(bounds, zoom);
    let mut urls = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            urls.push(tile_url(template, TileCoord { x, y, z: zoom }, extra_query));
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: GeoBounds = GeoBounds {
        north: MAX_LATITUDE,
        south: -MAX_LATITUDE,
        east: 180.0,
        west: -180.0,
    };

    #[test]
    fn test_project_origin_zoom_zero() {
        let (x, y) = project(LatLng { lat: 0.0, lng: 0.0 }, 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let point = LatLng {
            lat: 51.5007,
            lng: -0.1246,
        };
        let (x, y) = project(point, 13.0);
        let back = unproject(x, y, 13.0);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lng - point.lng).abs() < 1e-9);
    }

    #[test]
    fn test_geo_to_tile_world_center() {
        let tile = geo_to_tile(LatLng { lat: 0.0, lng: 0.0 }, 2);
        assert_eq!(tile, TileCoord { x: 2, y: 2, z: 2 });
    }

    #[test]
    fn test_geo_to_tile_clamps_poles_and_antimeridian() {
        let tile = geo_to_tile(
            LatLng {
                lat: -90.0,
                lng: 180.0,
            },
            3,
        );
        assert_eq!(tile, TileCoord { x: 7, y: 7, z: 3 });

        let tile = geo_to_tile(
            LatLng {
                lat: 90.0,
                lng: -180.0,
            },
            3,
        );
        assert_eq!(tile, TileCoord { x: 0, y: 0, z: 3 });
    }

    #[test]
    fn test_geo_to_tile_zoom_zero_single_tile() {
        let tile = geo_to_tile(
            LatLng {
                lat: 51.5,
                lng: -0.12,
            },
            0,
        );
        assert_eq!(tile, TileCoord { x: 0, y: 0, z: 0 });
    }

    #[test]
    fn test_tile_to_geo_known_corner() {
        // Reference values from the mercantile test suite.
        let nw = tile_to_geo(TileCoord {
            x: 486,
            y: 332,
            z: 10,
        });
        assert!((nw.lng - (-9.140625)).abs() < 1e-9);
        assert!((nw.lat - 53.33087298301705).abs() < 1e-9);
    }

    #[test]
    fn test_tile_round_trip_through_center() {
        let tile = TileCoord {
            x: 486,
            y: 332,
            z: 10,
        };
        let b = tile_bounds(tile);
        let center = LatLng {
            lat: (b.north + b.south) / 2.0,
            lng: (b.east + b.west) / 2.0,
        };
        assert_eq!(geo_to_tile(center, 10), tile);
    }

    #[test]
    fn test_tile_bounds_contains_interior_point() {
        let point = LatLng {
            lat: 51.5007,
            lng: -0.1246,
        };
        let tile = geo_to_tile(point, 13);
        let bounds = tile_bounds(tile);
        assert!(bounds.south < point.lat && point.lat < bounds.north);
        assert!(bounds.west < point.lng && point.lng < bounds.east);
    }

    #[test]
    fn test_bounds_to_tile_range_whole_world() {
        for zoom in [0u8, 1, 3, 5] {
            let (min, max) = bounds_to_tile_range(WORLD, zoom);
            let last = (1u32 << zoom) - 1;
            assert_eq!(min, TileCoord { x: 0, y: 0, z: zoom });
            assert_eq!(
                max,
                TileCoord {
                    x: last,
                    y: last,
                    z: zoom
                }
            );
        }
    }

    #[test]
    fn test_bounds_to_tile_range_degenerate_point() {
        let point = LatLng {
            lat: 51.5,
            lng: -0.12,
        };
        let bounds = GeoBounds {
            north: point.lat,
            south: point.lat,
            east: point.lng,
            west: point.lng,
        };
        let (min, max) = bounds_to_tile_range(bounds, 10);
        assert_eq!(min, max);
        assert_eq!(min, geo_to_tile(point, 10));
    }

    #[test]
    fn test_bounds_to_tile_range_flipped_bounds_still_ordered() {
        let bounds = GeoBounds {
            north: 10.0,
            south: 20.0,
            east: -10.0,
            west: 10.0,
        };
        let (min, max) = bounds_to_tile_range(bounds, 4);
        assert!(min.x <= max.x);
        assert!(min.y <= max.y);
    }

    #[test]
    fn test_tile_url_substitution() {
        let url = tile_url(
            "/api/tiles/raster/{z}/{x}/{y}",
            TileCoord { x: 1, y: 2, z: 3 },
            &[],
        );
        assert_eq!(url, "/api/tiles/raster/3/1/2");
    }

    #[test]
    fn test_tile_url_with_style_query() {
        let url = tile_url(
            "/api/tiles/raster/{z}/{x}/{y}",
            TileCoord { x: 1, y: 2, z: 3 },
            &[("styleId", "dark")],
        );
        assert_eq!(url, "/api/tiles/raster/3/1/2?styleId=dark");
    }

    #[test]
    fn test_tile_url_appends_to_existing_query() {
        let url = tile_url(
            "/tiles/{z}/{x}/{y}?v=2",
            TileCoord { x: 0, y: 0, z: 0 },
            &[("styleId", "dark")],
        );
        assert_eq!(url, "/tiles/0/0/0?v=2&styleId=dark");
    }

    #[test]
    fn test_tile_urls_covers_range() {
        let (min, max) = bounds_to_tile_range(WORLD, 2);
        let count = ((max.x - min.x + 1) * (max.y - min.y + 1)) as usize;
        let urls = tile_urls("/t/{z}/{x}/{y}", WORLD, 2, &[]);
        assert_eq!(urls.len(), count);
        assert_eq!(urls[0], "/t/2/0/0");
        assert_eq!(urls[urls.len() - 1], "/t/2/3/3");
    }
}

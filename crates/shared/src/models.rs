use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn north_west(&self) -> LatLng {
        LatLng {
            lat: self.north,
            lng: self.west,
        }
    }

    pub fn south_east(&self) -> LatLng {
        LatLng {
            lat: self.south,
            lng: self.east,
        }
    }
}

/// What the map is showing: zoom level and geographic center. Zoom is a
/// float because fractional zoom levels are legal in the fragment
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub lat: f64,
    pub lng: f64,
}

impl ViewState {
    /// True when every field is usable (non-zero and numeric). A state
    /// with a zero or NaN field must not reach the address bar.
    pub fn is_complete(&self) -> bool {
        is_truthy(self.zoom) && is_truthy(self.lat) && is_truthy(self.lng)
    }
}

fn is_truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Tile index in the power-of-two slippy grid at zoom `z`. (0, 0) is the
/// northwest corner of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

// Types mirroring the /api/info contract

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub style: StyleInfo,
    pub datasets: Vec<DatasetInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub default_style_id: String,
    pub style_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Midpoint of the box, the default map center for a dataset.
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.max_lat + self.min_lat) / 2.0,
            lng: (self.max_lon + self.min_lon) / 2.0,
        }
    }

    pub fn to_geo(&self) -> GeoBounds {
        GeoBounds {
            north: self.max_lat,
            south: self.min_lat,
            east: self.max_lon,
            west: self.min_lon,
        }
    }
}

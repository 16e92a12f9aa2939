use thiserror::Error;

use crate::fragment::FragmentMap;
use crate::models::ViewState;

/// Fragment key reserved for the map view.
pub const VIEW_KEY: &str = "map";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("malformed view-state encoding: expected 3 segments, got {0}")]
    SegmentCount(usize),
}

/// Extract the view state from a parsed fragment.
///
/// A missing view key is normal (first load) and returns `Ok(None)`. The
/// value must have exactly three `/`-separated segments. A segment that
/// is not a number decodes as NaN rather than an error; callers treat
/// the fields defensively.
pub fn decode(map: &FragmentMap) -> Result<Option<ViewState>, FormatError> {
    let Some(value) = map.get(VIEW_KEY) else {
        return Ok(None);
    };

    let segments: Vec<&str> = value.split('/').collect();
    if segments.len() != 3 {
        return Err(FormatError::SegmentCount(segments.len()));
    }

    Ok(Some(ViewState {
        zoom: parse_segment(segments[0]),
        lat: parse_segment(segments[1]),
        lng: parse_segment(segments[2]),
    }))
}

fn parse_segment(s: &str) -> f64 {
    s.parse().unwrap_or(f64::NAN)
}

/// Fold a view state into a copy of `existing` under the view key.
///
/// An incomplete state (any zero or NaN field) is never written: the
/// copy comes back unchanged and a diagnostic is logged. Latitude and
/// longitude are rendered with exactly 4 decimal digits; zoom keeps its
/// full precision.
pub fn encode(state: &ViewState, existing: &FragmentMap) -> FragmentMap {
    let mut map = existing.clone();
    if !state.is_complete() {
        tracing::warn!(
            zoom = state.zoom,
            lat = state.lat,
            lng = state.lng,
            "skipping fragment write, incomplete view state"
        );
        return map;
    }

    map.insert(
        VIEW_KEY.to_string(),
        format!("{}/{:.4}/{:.4}", state.zoom, state.lat, state.lng),
    );
    map
}

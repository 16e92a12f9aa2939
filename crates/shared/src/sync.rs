use crate::fragment;
use crate::models::{LatLng, TileCoord, ViewState};
use crate::tile;
use crate::viewstate::{self, FormatError};

/// Keeps the address-bar fragment and the map widget in step without
/// feeding back into itself.
///
/// The fragment is shared, externally mutable state, so it is passed in
/// as a value on every call instead of being cached here. Each real
/// write is tagged with a sequence number; the change notification the
/// write triggers is recognized by it and ignored.
#[derive(Debug, Default)]
pub struct ViewSync {
    write_seq: u64,
    pending: Option<PendingWrite>,
}

#[derive(Debug)]
struct PendingWrite {
    seq: u64,
    fragment: String,
}

impl ViewSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget settled on a view. Fold it into `current_fragment` and
    /// return the fragment to write, or `None` when no write is needed
    /// (the view already matches the fragment, or the state is
    /// incomplete and the write was skipped with a diagnostic).
    pub fn record_view(&mut self, view: ViewState, current_fragment: &str) -> Option<String> {
        let parsed = fragment::parse(current_fragment);
        let merged = viewstate::encode(&view, &parsed);
        if merged == parsed {
            return None;
        }

        let encoded = fragment::serialize(&merged);
        self.write_seq += 1;
        self.pending = Some(PendingWrite {
            seq: self.write_seq,
            fragment: encoded.clone(),
        });
        Some(encoded)
    }

    /// A fragment-change notification arrived. Returns the view to apply,
    /// `Ok(None)` when the widget should stay put (our own write echoing
    /// back, or no view key in the fragment), or the format error for a
    /// malformed value.
    pub fn apply_fragment(&mut self, fragment_str: &str) -> Result<Option<ViewState>, FormatError> {
        if let Some(pending) = self.pending.take() {
            if pending.fragment == fragment_str {
                tracing::debug!(seq = pending.seq, "ignoring own fragment write");
                return Ok(None);
            }
        }

        let parsed = fragment::parse(fragment_str);
        viewstate::decode(&parsed)
    }
}

/// Debug aid for a map click: the tile containing the point at the
/// current zoom, and its fetch URL.
pub fn click_tile(
    template: &str,
    point: LatLng,
    zoom: u8,
    extra_query: &[(&str, &str)],
) -> (TileCoord, String) {
    let coord = tile::geo_to_tile(point, zoom);
    let url = tile::tile_url(template, coord, extra_query);
    (coord, url)
}

use slippyview_shared::models::ServerInfo;

/// Tile layer URL template served by the backend.
pub const TILE_URL_TEMPLATE: &str = "/api/tiles/raster/{z}/{x}/{y}";

fn api_url() -> String {
    // In production, same origin. In dev, might be different.
    let window = web_sys::window().unwrap();
    let origin = window.location().origin().unwrap();
    format!("{}/api/info", origin)
}

pub async fn fetch_info() -> Result<ServerInfo, String> {
    let resp = reqwest::Client::new()
        .get(api_url())
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let info: ServerInfo = resp.json().await.map_err(|e| e.to_string())?;

    Ok(info)
}

#[cfg(test)]
mod tests {
    use slippyview_shared::models::ServerInfo;

    // --- Response deserialization ---

    #[test]
    fn test_server_info_deserializes() {
        let json = r#"{"style":{"defaultStyleId":"default","styleIds":["default","alternate"]},"datasets":[{"bounds":{"minLat":51.0,"maxLat":52.0,"minLon":-1.0,"maxLon":1.0}}]}"#;
        let info: ServerInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.style.default_style_id, "default");
        assert_eq!(info.style.style_ids, vec!["default", "alternate"]);
        assert_eq!(info.datasets.len(), 1);
        assert_eq!(info.datasets[0].bounds.min_lat, 51.0);
        assert_eq!(info.datasets[0].bounds.max_lon, 1.0);
    }

    #[test]
    fn test_server_info_deserializes_without_datasets() {
        let json = r#"{"style":{"defaultStyleId":"default","styleIds":["default"]},"datasets":[]}"#;
        let info: ServerInfo = serde_json::from_str(json).unwrap();
        assert!(info.datasets.is_empty());
    }
}

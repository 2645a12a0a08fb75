// src/utils/assets.rs

use url::Url;

pub const DEFAULT_AVATAR: &str = "./graduated.png";
pub const DEFAULT_BANNER: &str = "/background.jpg";

/// Public URL of an uploaded avatar, or the placeholder when there is none.
pub fn avatar_url(base: &Url, avatar: Option<&str>) -> String {
    asset_url(base, avatar).unwrap_or_else(|| DEFAULT_AVATAR.to_string())
}

pub fn banner_url(base: &Url, banner: Option<&str>) -> String {
    asset_url(base, banner).unwrap_or_else(|| DEFAULT_BANNER.to_string())
}

/// Server paths hang off the API base URL; absolute URLs pass through.
fn asset_url(base: &Url, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

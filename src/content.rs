//! Content-type classification for logged requests.
//!
//! Pure string cascade over the request path; first match wins. Order
//! matters: an admin path ending in ".xml" is still admin, not a feed.

use serde::{Deserialize, Serialize};

/// Coarse content category of a requested URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentClass {
    /// Admin or dashboard path
    Admin,
    /// JSON/REST API endpoint
    Api,
    /// Feed (RSS/Atom/sitemap)
    Feed,
    /// Uploaded or bundled asset path
    Asset,
    /// Image file
    Image,
    /// Stylesheet or script file
    Static,
    /// Regular page
    Page,
}

impl ContentClass {
    /// Returns the class as a string for log rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentClass::Admin => "admin",
            ContentClass::Api => "api",
            ContentClass::Feed => "feed",
            ContentClass::Asset => "asset",
            ContentClass::Image => "image",
            ContentClass::Static => "static",
            ContentClass::Page => "page",
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico"];

/// Classify a request path or URL into a content category.
pub fn classify_content(page_url: &str) -> ContentClass {
    let path = page_url
        .split('?')
        .next()
        .unwrap_or(page_url)
        .to_lowercase();

    if path.contains("/wp-admin") || path.contains("/admin") {
        ContentClass::Admin
    } else if path.contains("/wp-json") || path.contains("/api/") || path.ends_with("/api") {
        ContentClass::Api
    } else if path.ends_with(".xml") || path.contains("/feed") || path.ends_with("/rss") {
        ContentClass::Feed
    } else if path.contains("/wp-content/")
        || path.contains("/wp-includes/")
        || path.contains("/assets/")
        || path.contains("/static/")
    {
        ContentClass::Asset
    } else if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        ContentClass::Image
    } else if path.ends_with(".css") || path.ends_with(".js") {
        ContentClass::Static
    } else {
        ContentClass::Page
    }
}

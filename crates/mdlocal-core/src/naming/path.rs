//! Filename hint from a URL path.

/// Returns the last `/`-separated segment of `url` as written, without query
/// or fragment. `None` when that segment is empty (trailing slash) or the URL
/// has no path beyond its host.
///
/// The segment is taken from the literal text, so `café.png` stays `café.png`
/// rather than its percent-encoded form. Targets that are not absolute URLs
/// (custom selectors may pick relative paths) are split the same way.
pub fn last_path_segment(url: &str) -> Option<String> {
    if let Ok(parsed) = url::Url::parse(url) {
        if parsed.has_host() && parsed.path() == "/" {
            return None;
        }
    }
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let segment = url[..end].rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

//! Local filename derivation for downloaded images.
//!
//! A selected URL gets its base name from the link's alt text, falling back to
//! the last URL path segment and then to [`FALLBACK_NAME`]. The allocator then
//! makes that name unique against the asset directory and the names already
//! handed out for the current document.

mod allocate;
mod mapping;
mod path;
mod sanitize;

pub use allocate::{allocate_filename, split_extension, AssetDir, NameExists};
pub use mapping::AssetMapping;
pub use path::last_path_segment;
pub use sanitize::sanitize_name;

/// Name used when neither alt text nor URL yields anything usable.
pub const FALLBACK_NAME: &str = "image";

/// Derives the (not yet de-duplicated) filename for `url`.
///
/// # Examples
///
/// - `derive_base_name("https://ex.com/cat.png", "")` → `"cat.png"`
/// - `derive_base_name("https://ex.com/cat.png", "A cat")` → `"A_cat"`
/// - `derive_base_name("https://ex.com/", "")` → `"image"`
pub fn derive_base_name(url: &str, alt: &str) -> String {
    let alt = alt.trim();
    if !alt.is_empty() {
        return sanitize_name(alt);
    }
    match last_path_segment(url) {
        Some(segment) => sanitize_name(&segment),
        None => FALLBACK_NAME.to_string(),
    }
}

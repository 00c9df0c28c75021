//! Substitutes downloaded URLs with their local asset paths.

use regex::{Captures, Regex};

use crate::naming::AssetMapping;

/// Relative, `/`-separated path of `filename` inside `assets_dir`.
///
/// `./assets/`, `assets` and `assets\` all give `assets/<filename>`.
pub fn local_link(assets_dir: &str, filename: &str) -> String {
    let mut dir = assets_dir.replace('\\', "/");
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest.to_string();
    }
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        filename.to_string()
    } else {
        format!("{dir}/{filename}")
    }
}

/// Replaces every literal occurrence of each mapped URL in `text`.
///
/// This is plain substring replacement: the same URL inside a regular link or
/// in prose is rewritten too. All URLs are matched in one pass over the
/// original text, so inserted local paths are never matched again. Where two
/// URLs start at the same position (`a.png` vs `a.png?v=2`) the longer wins.
pub fn rewrite_links(
    text: &str,
    mapping: &AssetMapping,
    assets_dir: &str,
) -> Result<String, regex::Error> {
    if mapping.is_empty() {
        return Ok(text.to_string());
    }

    let mut urls: Vec<&str> = mapping.iter().map(|(url, _)| url).collect();
    urls.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = urls
        .iter()
        .map(|url| regex::escape(url))
        .collect::<Vec<_>>()
        .join("|");
    let matcher = Regex::new(&alternation)?;

    let out = matcher.replace_all(text, |caps: &Captures| {
        let url = &caps[0];
        match mapping.get(url) {
            Some(filename) => local_link(assets_dir, filename),
            None => url.to_string(),
        }
    });
    Ok(out.into_owned())
}

//! Image-embed extraction.

use regex::Regex;
use std::sync::LazyLock;

static IMAGE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image link regex is valid")
});

/// One `![alt](target)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Alt text, trimmed.
    pub alt: String,
    /// Everything between the parentheses, trimmed. May include a title.
    pub target: String,
}

impl Link {
    /// The link destination without an optional title:
    /// `https://x/a.png "Title"` → `https://x/a.png`.
    pub fn url(&self) -> &str {
        self.target
            .split_whitespace()
            .next()
            .unwrap_or(self.target.as_str())
    }
}

/// Returns every image link in `text`, in order of appearance.
pub fn extract_links(text: &str) -> Vec<Link> {
    IMAGE_LINK_RE
        .captures_iter(text)
        .map(|cap| Link {
            alt: cap[1].trim().to_string(),
            target: cap[2].trim().to_string(),
        })
        .collect()
}

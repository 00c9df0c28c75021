//! Selector filtering and de-duplication.

use regex::Regex;
use std::collections::HashMap;

use super::Link;

/// A distinct URL chosen for download, with the alt text used as its naming hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedUrl {
    pub url: String,
    pub alt: String,
}

/// Keeps the links whose URL matches `selector` (unanchored search), one entry
/// per distinct URL in first-seen order.
///
/// When a URL appears several times the alt text of its last matching
/// occurrence wins.
pub fn select_urls(links: &[Link], selector: &Regex) -> Vec<SelectedUrl> {
    let mut selected: Vec<SelectedUrl> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for link in links {
        let url = link.url();
        if !selector.is_match(url) {
            continue;
        }
        match index.get(url) {
            Some(&i) => selected[i].alt = link.alt.clone(),
            None => {
                index.insert(url, selected.len());
                selected.push(SelectedUrl {
                    url: url.to_string(),
                    alt: link.alt.clone(),
                });
            }
        }
    }

    selected
}

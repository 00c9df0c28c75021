//! Per-document URL → filename table.

/// Source URL to allocated filename, in allocation order.
///
/// Owned by a single document's clone run and dropped once the clone is
/// written. Documents hold a handful of images, so lookups scan the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMapping {
    entries: Vec<(String, String)>,
}

impl AssetMapping {
    /// Filename allocated to `url`, if any.
    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, name)| name.as_str())
    }

    /// True if some URL already owns `filename`.
    pub fn contains_name(&self, filename: &str) -> bool {
        self.entries.iter().any(|(_, name)| name == filename)
    }

    /// Records `url → filename`, replacing an earlier entry for the same URL.
    pub fn insert(&mut self, url: String, filename: String) {
        match self.entries.iter_mut().find(|(u, _)| *u == url) {
            Some(entry) => entry.1 = filename,
            None => self.entries.push((url, filename)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, n)| (u.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

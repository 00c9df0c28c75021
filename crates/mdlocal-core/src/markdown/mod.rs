//! Markdown image links: extraction, selection and rewriting.
//!
//! Only the inline image form `![alt](target)` is recognized. There is no
//! handling of escapes, nested brackets, reference-style images or code spans;
//! a link that looks like an image embed is treated as one wherever it occurs.

mod extract;
mod rewrite;
mod select;

pub use extract::{extract_links, Link};
pub use rewrite::{local_link, rewrite_links};
pub use select::{select_urls, SelectedUrl};

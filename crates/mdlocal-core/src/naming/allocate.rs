//! Collision-free filename allocation.

use std::path::PathBuf;

use super::{AssetMapping, FALLBACK_NAME};
use crate::fetch::temp_path;

/// Answers whether a filename is already taken on disk.
pub trait NameExists {
    fn exists(&self, filename: &str) -> bool;
}

/// Existence check against a real asset directory.
///
/// A name also counts as taken when its download temp file (`<name>.part`)
/// is present, since the fetcher refuses to reuse one.
#[derive(Debug, Clone)]
pub struct AssetDir {
    dir: PathBuf,
}

impl AssetDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl NameExists for AssetDir {
    fn exists(&self, filename: &str) -> bool {
        // symlink_metadata so a dangling symlink still counts as taken
        let path = self.dir.join(filename);
        path.symlink_metadata().is_ok() || temp_path(&path).symlink_metadata().is_ok()
    }
}

/// Splits `name` at its last `.`: `photo.v2.png` → (`photo.v2`, `.png`).
/// No dot means no extension; an empty stem (`.png`) becomes [`FALLBACK_NAME`].
pub fn split_extension(name: &str) -> (&str, String) {
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            let stem = if stem.is_empty() { FALLBACK_NAME } else { stem };
            (stem, format!(".{ext}"))
        }
        None => (name, String::new()),
    }
}

/// Returns `base_name` if it is free, else `<stem>_<n><ext>` for the smallest
/// `n >= 1` that is neither on disk nor already in `mapping`.
pub fn allocate_filename<E: NameExists + ?Sized>(
    base_name: &str,
    on_disk: &E,
    mapping: &AssetMapping,
) -> String {
    let taken = |candidate: &str| on_disk.exists(candidate) || mapping.contains_name(candidate);

    if !taken(base_name) {
        return base_name.to_string();
    }

    let (stem, ext) = split_extension(base_name);
    let mut idx = 1u32;
    loop {
        let candidate = format!("{stem}_{idx}{ext}");
        if !taken(&candidate) {
            return candidate;
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FakeDisk(HashSet<&'static str>);

    impl NameExists for FakeDisk {
        fn exists(&self, filename: &str) -> bool {
            self.0.contains(filename)
        }
    }

    fn empty_disk() -> FakeDisk {
        FakeDisk(HashSet::new())
    }

    #[test]
    fn split_extension_cases() {
        assert_eq!(split_extension("cat.png"), ("cat", ".png".to_string()));
        assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz".to_string()));
        assert_eq!(split_extension("noext"), ("noext", String::new()));
        assert_eq!(split_extension(".png"), ("image", ".png".to_string()));
    }

    #[test]
    fn free_name_is_kept() {
        let m = AssetMapping::default();
        assert_eq!(allocate_filename("cat.png", &empty_disk(), &m), "cat.png");
    }

    #[test]
    fn same_base_for_distinct_urls_gets_numeric_suffix() {
        let mut m = AssetMapping::default();
        let first = allocate_filename("cat.png", &empty_disk(), &m);
        m.insert("https://a.com/cat.png".into(), first.clone());
        let second = allocate_filename("cat.png", &empty_disk(), &m);
        m.insert("https://b.com/cat.png".into(), second.clone());
        let third = allocate_filename("cat.png", &empty_disk(), &m);
        assert_eq!(first, "cat.png");
        assert_eq!(second, "cat_1.png");
        assert_eq!(third, "cat_2.png");
    }

    #[test]
    fn existing_file_is_never_reused() {
        let disk = FakeDisk(["cat.png", "cat_1.png"].into_iter().collect());
        let m = AssetMapping::default();
        assert_eq!(allocate_filename("cat.png", &disk, &m), "cat_2.png");
    }

    #[test]
    fn no_extension_appends_at_end() {
        let disk = FakeDisk(["A_cat"].into_iter().collect());
        assert_eq!(
            allocate_filename("A_cat", &disk, &AssetMapping::default()),
            "A_cat_1"
        );
    }

    #[test]
    fn asset_dir_checks_real_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.svg"), b"<svg/>").unwrap();
        let assets = AssetDir::new(dir.path());
        assert!(assets.exists("logo.svg"));
        assert!(!assets.exists("other.svg"));
        assert_eq!(
            allocate_filename("logo.svg", &assets, &AssetMapping::default()),
            "logo_1.svg"
        );
    }

    #[test]
    fn leftover_part_file_reserves_its_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.png.part"), b"USER DATA").unwrap();
        let assets = AssetDir::new(dir.path());
        assert!(assets.exists("x.png"));
        assert_eq!(
            allocate_filename("x.png", &assets, &AssetMapping::default()),
            "x_1.png"
        );
    }

    #[test]
    fn missing_asset_dir_means_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetDir::new(dir.path().join("not-created-yet"));
        assert!(!assets.exists("a.png"));
    }
}

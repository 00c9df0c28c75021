//! Portable filename sanitization.

use super::FALLBACK_NAME;

/// Maps `name` onto the character set `[A-Za-z0-9._-]`.
///
/// - Each run of other characters becomes a single `_`
/// - Leading/trailing `_` are trimmed
/// - Empty results and the reserved names `.`/`..` become [`FALLBACK_NAME`]
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_name("cat-01_v2.png"), "cat-01_v2.png");
    }

    #[test]
    fn collapses_unsafe_runs() {
        assert_eq!(sanitize_name("a cat / on a mat"), "a_cat_on_a_mat");
        assert_eq!(sanitize_name("naïve café.jpg"), "na_ve_caf_.jpg");
    }

    #[test]
    fn trims_underscores() {
        assert_eq!(sanitize_name("  (figure 1)  "), "figure_1");
        assert_eq!(sanitize_name("__x__"), "x");
    }

    #[test]
    fn path_separators_never_survive() {
        assert_eq!(sanitize_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_name("a\\b"), "a_b");
    }

    #[test]
    fn empty_and_reserved_fall_back() {
        assert_eq!(sanitize_name(""), "image");
        assert_eq!(sanitize_name("???"), "image");
        assert_eq!(sanitize_name(".."), "image");
        assert_eq!(sanitize_name("."), "image");
    }
}

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Clone suffix inserted before the document extension.
pub const DEFAULT_SUFFIX: &str = ".local";
/// Asset directory, relative to each source document.
pub const DEFAULT_ASSETS_DIR: &str = "assets";
/// Selector matching any link target with a network scheme.
pub const DEFAULT_PATTERN: &str = r"https?://";
/// Upper bound on a single image download.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Global configuration loaded from `~/.config/mdlocal/config.toml`.
///
/// Every field has a default so a partial file still parses. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MdlocalConfig {
    /// Suffix inserted before the extension to name the clone.
    pub suffix: String,
    /// Directory (relative to each document) that receives downloaded images.
    pub assets_dir: String,
    /// Regex selecting which image targets are downloaded.
    pub pattern: String,
    /// Total time allowed for one download, in seconds.
    pub fetch_timeout_secs: u64,
    /// Optional User-Agent override (None = `mdlocal/<version>`).
    pub user_agent: Option<String>,
}

impl Default for MdlocalConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl MdlocalConfig {
    /// Rejects values that would disable a guarantee of the run.
    ///
    /// libcurl reads a zero timeout as "wait forever".
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            bail!("fetch_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdlocal")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdlocalConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MdlocalConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: MdlocalConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate().with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = MdlocalConfig::default();
        assert_eq!(cfg.suffix, ".local");
        assert_eq!(cfg.assets_dir, "assets");
        assert_eq!(cfg.pattern, "https?://");
        assert_eq!(cfg.fetch_timeout_secs, 30);
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = MdlocalConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MdlocalConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.suffix, cfg.suffix);
        assert_eq!(parsed.assets_dir, cfg.assets_dir);
        assert_eq!(parsed.pattern, cfg.pattern);
        assert_eq!(parsed.fetch_timeout_secs, cfg.fetch_timeout_secs);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            assets_dir = "img"
            fetch_timeout_secs = 5
        "#;
        let cfg: MdlocalConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.assets_dir, "img");
        assert_eq!(cfg.fetch_timeout_secs, 5);
        assert_eq!(cfg.suffix, ".local");
        assert_eq!(cfg.pattern, "https?://");
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            suffix = "offline"
            assets_dir = "media/images"
            pattern = '^https://cdn\.example\.com/'
            fetch_timeout_secs = 90
            user_agent = "archiver/1.0"
        "#;
        let cfg: MdlocalConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.suffix, "offline");
        assert_eq!(cfg.assets_dir, "media/images");
        assert_eq!(cfg.pattern, r"^https://cdn\.example\.com/");
        assert_eq!(cfg.fetch_timeout_secs, 90);
        assert_eq!(cfg.user_agent.as_deref(), Some("archiver/1.0"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg: MdlocalConfig = toml::from_str("fetch_timeout_secs = 0").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("fetch_timeout_secs"), "{err}");
        assert!(MdlocalConfig::default().validate().is_ok());
    }
}

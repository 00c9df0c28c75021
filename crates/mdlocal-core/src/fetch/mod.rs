//! Image download.
//!
//! One blocking libcurl transfer per URL. The body is streamed into
//! `<dest>.part` and renamed onto `<dest>` only after a 2xx response, so a
//! failed download never leaves a partial file under the allocated name. The
//! temp file must not exist beforehand; an existing `.part` is never touched.

mod error;

pub use error::FetchError;

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DEFAULT_FETCH_TIMEOUT_SECS;

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `cat.png` → `cat.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Retrieves a URL into a local file.
pub trait Fetch {
    /// Downloads `url` to `dest`, creating parent directories first.
    /// Returns the number of bytes written.
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Production fetcher backed by libcurl's easy interface.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    user_agent: String,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS), None)
    }
}

impl CurlFetcher {
    pub fn new(timeout: Duration, user_agent: Option<String>) -> Self {
        Self {
            timeout,
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        }
    }

    fn get_into(&self, url: &str, mut file: File) -> Result<u64, FetchError> {
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(FetchError::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        file.sync_all()?;
        Ok(written)
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let part = temp_path(dest);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&part)
            .inspect_err(|e| {
                tracing::warn!(url, part = %part.display(), error = %e, "temp file unavailable");
            })?;
        match self.get_into(url, file) {
            Ok(bytes) => {
                if let Err(e) = fs::rename(&part, dest) {
                    let _ = fs::remove_file(&part);
                    return Err(e.into());
                }
                tracing::debug!(url, bytes, dest = %dest.display(), "download complete");
                Ok(bytes)
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                tracing::warn!(
                    url,
                    error = %e,
                    timed_out = e.is_timeout(),
                    timeout_secs = self.timeout.as_secs(),
                    "download failed"
                );
                Err(e)
            }
        }
    }
}

fn default_user_agent() -> String {
    format!("mdlocal/{}", env!("CARGO_PKG_VERSION"))
}

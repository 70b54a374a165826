//! Object URLs for document previews.
//!
//! Every URL handed out must be revoked exactly once: before a replacement is
//! created and whenever the preview modal closes.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Issues and releases short-lived URLs for downloaded file contents.
pub trait ObjectUrls {
    fn create(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String>;
    fn revoke(&mut self, url: &str);
}

/// The preview currently open, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSlot {
    pub url: String,
    pub file_name: String,
}

/// [`ObjectUrls`] backed by files in a scratch directory, exposed as
/// `file://` URLs. Anything still live is removed on drop.
#[derive(Debug)]
pub struct TempFileUrls {
    dir: PathBuf,
    sequence: u64,
    live: BTreeSet<PathBuf>,
}

impl TempFileUrls {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            sequence: 0,
            live: BTreeSet::new(),
        })
    }

    pub fn in_temp_dir() -> io::Result<Self> {
        Self::new(std::env::temp_dir().join(format!("hr-portal-previews-{}", std::process::id())))
    }

    /// Number of URLs created and not yet revoked.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ObjectUrls for TempFileUrls {
    fn create(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String> {
        self.sequence += 1;
        let safe_name: String = file_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        let path = self.dir.join(format!("{:04}-{safe_name}", self.sequence));
        fs::write(&path, contents)?;
        let url = format!("file://{}", path.display());
        debug!(%url, "preview created");
        self.live.insert(path);
        Ok(url)
    }

    fn revoke(&mut self, url: &str) {
        let Some(path) = url.strip_prefix("file://").map(PathBuf::from) else {
            return;
        };
        if self.live.remove(&path) {
            if let Err(err) = fs::remove_file(&path) {
                debug!(error = %err, path = %path.display(), "preview file already gone");
            }
        }
    }
}

impl Drop for TempFileUrls {
    fn drop(&mut self) {
        for path in std::mem::take(&mut self.live) {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoking_removes_the_backing_file() {
        let dir = std::env::temp_dir().join(format!("hr-portal-preview-test-{}", std::process::id()));
        let mut urls = TempFileUrls::new(&dir).expect("scratch dir");

        let url = urls.create("nbi clearance.pdf", b"%PDF-1.4").expect("url created");
        let path = PathBuf::from(url.trim_start_matches("file://"));
        assert!(path.exists());
        assert!(url.ends_with("nbi_clearance.pdf"));
        assert_eq!(urls.live(), 1);

        urls.revoke(&url);
        assert!(!path.exists());
        assert_eq!(urls.live(), 0);

        // second revoke is a no-op
        urls.revoke(&url);
        assert_eq!(urls.live(), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}

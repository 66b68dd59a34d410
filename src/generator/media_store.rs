use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub trait MediaStore: Send + Sync {
    fn save(&self, png: &[u8], filename: &str) -> Result<PathBuf>;
}

pub struct DirectoryMediaStore {
    pub dir: PathBuf,
}

impl DirectoryMediaStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MediaStore for DirectoryMediaStore {
    fn save(&self, png: &[u8], filename: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("cannot create {}", self.dir.display()))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, png).with_context(|| format!("cannot write {}", path.display()))?;
        tracing::info!("saved QR code to {}", path.display());
        Ok(path)
    }
}

pub fn suggested_filename(now: DateTime<Utc>) -> String {
    format!("qr-{}.png", now.timestamp_millis())
}

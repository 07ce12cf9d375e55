//! Template storage.
//!
//! Templates live as `.docx` files on disk, one per [`LetterKind`]. Bytes
//! are re-read for every generation, so the stored template is never
//! mutated by a fill.

use std::fs;
use std::path::{Path, PathBuf};

use super::common::get_static_dir;
use super::{LetterError, LetterKind};

#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory from `TEMPLATES_DIR`, defaulting to the crate's `static/`.
    pub fn from_env() -> Self {
        match std::env::var("TEMPLATES_DIR") {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::new(get_static_dir()),
        }
    }

    pub fn path_for(&self, kind: LetterKind) -> PathBuf {
        self.dir.join(kind.template_file())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a template's bytes fresh from disk.
    pub fn load(&self, kind: LetterKind) -> Result<Vec<u8>, LetterError> {
        let path = self.path_for(kind);
        if !path.exists() {
            return Err(LetterError::TemplateNotFound {
                name: kind.template_file().to_string(),
            });
        }
        fs::read(&path).map_err(LetterError::TemplateIo)
    }
}

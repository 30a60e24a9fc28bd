//! Image directory layout.
//!
//! Every client image folder uses the same fixed sub-directories; new
//! files land in `not-yet-uploaded` and the router moves them out as
//! they are classified and processed.

use std::path::{Path, PathBuf};

/// The fixed sub-directories under an image root.
#[derive(Debug, Clone)]
pub struct ImageLayout {
    root: PathBuf,
}

impl ImageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where new files arrive and where every scan starts.
    pub fn pending(&self) -> PathBuf {
        self.root.join("not-yet-uploaded")
    }

    /// Files whose image has been attached to a catalog object.
    pub fn uploaded(&self) -> PathBuf {
        self.root.join("uploaded")
    }

    /// Valid SKUs with no catalog record yet, waiting on the sheet.
    pub fn not_yet_on_excel(&self) -> PathBuf {
        self.root.join("not-yet-on-excel")
    }

    pub fn invalid_file_name(&self) -> PathBuf {
        self.root.join("invalid-file-name")
    }

    pub fn invalid_file_type(&self) -> PathBuf {
        self.root.join("invalid-file-type")
    }

    pub fn invalid_file_size(&self) -> PathBuf {
        self.root.join("invalid-file-size")
    }
}

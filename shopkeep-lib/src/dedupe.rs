//! Duplicate-upload report.
//!
//! Pending files that already exist in the uploaded directory (by
//! case-insensitive filename) were processed in an earlier run and
//! re-synced by someone; the report names them so they can be cleaned
//! up by hand. Nothing is moved or deleted here.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use shopkeep_core::is_ignored;

use crate::layout::ImageLayout;

#[derive(Debug, Default)]
pub struct DedupeReport {
    pub uploaded_count: usize,
    pub pending_count: usize,
    /// Pending file names (original casing) also present in uploaded.
    pub duplicates: Vec<String>,
}

/// Compare the uploaded directory against the pending directory.
pub fn find_reuploads(layout: &ImageLayout) -> io::Result<DedupeReport> {
    let uploaded = list_file_names(&layout.uploaded())?;
    let pending = list_file_names(&layout.pending())?;

    let uploaded_lower: HashSet<String> = uploaded.iter().map(|n| n.to_lowercase()).collect();

    let duplicates: Vec<String> = pending
        .iter()
        .filter(|name| uploaded_lower.contains(&name.to_lowercase()))
        .cloned()
        .collect();

    Ok(DedupeReport {
        uploaded_count: uploaded.len(),
        pending_count: pending.len(),
        duplicates,
    })
}

fn list_file_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(|s| s.to_owned()))
        .filter(|name| !is_ignored(name))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all};

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn reports_case_insensitive_reuploads() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ImageLayout::new(tmp.path());
        create_dir_all(layout.uploaded()).unwrap();
        create_dir_all(layout.pending()).unwrap();

        touch(&layout.uploaded().join("123456789.JPG"));
        touch(&layout.uploaded().join("111111111.png"));
        touch(&layout.pending().join("123456789.jpg"));
        touch(&layout.pending().join("222222222.png"));

        let report = find_reuploads(&layout).unwrap();
        assert_eq!(report.uploaded_count, 2);
        assert_eq!(report.pending_count, 2);
        assert_eq!(report.duplicates, vec!["123456789.jpg".to_owned()]);
    }

    #[test]
    fn housekeeping_files_are_not_counted() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ImageLayout::new(tmp.path());
        create_dir_all(layout.uploaded()).unwrap();
        create_dir_all(layout.pending()).unwrap();

        touch(&layout.uploaded().join("desktop.ini"));
        touch(&layout.pending().join("desktop.ini"));

        let report = find_reuploads(&layout).unwrap();
        assert_eq!(report.uploaded_count, 0);
        assert_eq!(report.pending_count, 0);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn empty_directories_produce_an_empty_report() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ImageLayout::new(tmp.path());
        create_dir_all(layout.uploaded()).unwrap();
        create_dir_all(layout.pending()).unwrap();

        let report = find_reuploads(&layout).unwrap();
        assert_eq!(report.duplicates, Vec::<String>::new());
    }
}

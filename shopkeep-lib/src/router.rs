//! File classification and routing.
//!
//! `plan_routes` scans the pending directory and buckets every file by
//! its [`ImageClass`]; `execute_moves` renames one bucket into its
//! destination directory. Planning and execution are split so the CLI
//! can show each bucket and ask for confirmation before anything moves,
//! and so the classification is testable without touching the catalog.

use std::fs;
use std::io;
use std::path::Path;

use shopkeep_core::{ImageClass, Sku, classify, is_ignored};

/// A pending file whose base name is a bare SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidImage {
    pub file_name: String,
    pub sku: Sku,
}

/// Result of classifying the pending directory: disjoint buckets, one
/// per terminal class.
#[derive(Debug, Default)]
pub struct RoutePlan {
    /// Number of non-ignored files scanned.
    pub scanned: usize,
    pub valid: Vec<ValidImage>,
    /// Variant shots (`123456789-1.jpg`); counted but never moved.
    pub duplicates: Vec<String>,
    pub invalid_names: Vec<String>,
    pub invalid_types: Vec<String>,
    pub invalid_sizes: Vec<String>,
}

impl RoutePlan {
    /// Total files placed into buckets.
    pub fn total_classified(&self) -> usize {
        self.valid.len()
            + self.duplicates.len()
            + self.invalid_names.len()
            + self.invalid_types.len()
            + self.invalid_sizes.len()
    }

    /// The consistency check printed in the debrief: every scanned file
    /// must be in exactly one bucket.
    pub fn totals_add_up(&self) -> bool {
        self.total_classified() == self.scanned
    }
}

/// Scan `pending_dir` and classify every regular file in it.
///
/// Sub-directories are left alone; housekeeping files are skipped
/// entirely and counted in no bucket. Entries are visited in name order
/// so repeated runs produce identical debriefs.
pub fn plan_routes(pending_dir: &Path) -> io::Result<RoutePlan> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(pending_dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    let mut plan = RoutePlan::default();

    for entry in &entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_owned(),
            None => continue,
        };
        if is_ignored(&file_name) {
            continue;
        }

        let size = entry.metadata()?.len();
        plan.scanned += 1;

        match classify(&file_name, size) {
            ImageClass::ValidSku(sku) => plan.valid.push(ValidImage { file_name, sku }),
            ImageClass::DuplicateVariant => plan.duplicates.push(file_name),
            ImageClass::InvalidName => plan.invalid_names.push(file_name),
            ImageClass::InvalidType => plan.invalid_types.push(file_name),
            ImageClass::InvalidSize => plan.invalid_sizes.push(file_name),
        }
    }

    Ok(plan)
}

/// Why a single rename failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFailureKind {
    /// Source is a file but the destination resolved to a directory.
    IsADirectory,
    /// Source is a directory but the destination is a file.
    NotADirectory,
    PermissionDenied,
    /// Any other operating-system error.
    Os,
}

impl MoveFailureKind {
    fn from_error(e: &io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::IsADirectory => MoveFailureKind::IsADirectory,
            io::ErrorKind::NotADirectory => MoveFailureKind::NotADirectory,
            io::ErrorKind::PermissionDenied => MoveFailureKind::PermissionDenied,
            _ => MoveFailureKind::Os,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            MoveFailureKind::IsADirectory => "destination is a directory",
            MoveFailureKind::NotADirectory => "destination is not a directory",
            MoveFailureKind::PermissionDenied => "operation not permitted",
            MoveFailureKind::Os => "OS error",
        }
    }
}

/// A rename that failed, categorized and kept for the summary.
#[derive(Debug, Clone)]
pub struct MoveFailure {
    pub file_name: String,
    pub kind: MoveFailureKind,
    pub message: String,
}

/// Outcome of moving one bucket.
#[derive(Debug, Default)]
pub struct MoveSummary {
    pub moved: usize,
    pub failures: Vec<MoveFailure>,
}

/// Rename each named file from `source_dir` into `dest_dir`.
///
/// A failed rename is categorized, logged, and skipped; the rest of the
/// batch still moves. A file that already exists at the destination is
/// left in place and reported rather than overwritten.
pub fn execute_moves(files: &[String], source_dir: &Path, dest_dir: &Path) -> MoveSummary {
    let mut summary = MoveSummary::default();

    for file_name in files {
        let source = source_dir.join(file_name);
        let dest = dest_dir.join(file_name);

        if dest.exists() {
            summary.failures.push(MoveFailure {
                file_name: file_name.clone(),
                kind: MoveFailureKind::Os,
                message: format!("target already exists: {}", dest.display()),
            });
            continue;
        }

        match fs::rename(&source, &dest) {
            Ok(()) => {
                log::debug!("moved {} -> {}", source.display(), dest.display());
                summary.moved += 1;
            }
            Err(e) => {
                let kind = MoveFailureKind::from_error(&e);
                log::warn!("{} for {file_name}: {e}", kind.describe());
                summary.failures.push(MoveFailure {
                    file_name: file_name.clone(),
                    kind,
                    message: e.to_string(),
                });
            }
        }
    }

    summary
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;

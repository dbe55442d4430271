use std::path::Path;

use anyhow::Result;
use indicatif::{HumanBytes, HumanCount, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::hasher::hash_file;
use crate::store::RESULTS_FILE_NAME;
use crate::utils::FileInfo;

/// Recursively walks `root` and returns a `FileInfo` for every regular file
/// that could be hashed.
///
/// Symbolic links are not followed and non-regular files (devices, sockets,
/// the directories themselves) are skipped, as is the tool's own
/// saved-results file. An unreadable directory entry or a file that fails
/// to open/read is reported and skipped; a single bad entry never aborts
/// the scan. Files appear in `walkdir` traversal order, which is stable for
/// an unchanged tree but not sorted.
pub fn scan_directory(root: &Path, chunk_size: usize) -> Result<Vec<FileInfo>> {
    info!("Starting directory scan: '{}'", root.display());

    let progress_bar = {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message("Scanning files...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let mut files = Vec::new();
    let mut total_size = 0u64;
    let mut files_skipped = 0;
    let mut entries_skipped = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                entries_skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        // A previous run's saved results never join a group.
        if entry.file_name() == RESULTS_FILE_NAME {
            debug!("Skipping saved-results file: '{}'", entry.path().display());
            continue;
        }
        let path = entry.path();
        debug!("Found file: '{}'", path.display());

        let size = match path.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                error!("Failed to read metadata for '{}': {}", path.display(), e);
                files_skipped += 1;
                continue;
            }
        };

        // Skip-and-report: a file that cannot be hashed is excluded from
        // any group instead of aborting the scan.
        let hash = match hash_file(path, chunk_size) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to calculate hash for '{}': {}", path.display(), e);
                files_skipped += 1;
                continue;
            }
        };

        total_size += size;
        files.push(FileInfo {
            path: path.to_path_buf(),
            size,
            hash,
        });
        progress_bar.set_message(format!("Scanning files... {} hashed", files.len()));
    }

    progress_bar.finish_and_clear();

    info!(
        "Directory scan complete: {} files hashed ({}), {} files skipped, {} entries unreadable",
        HumanCount(files.len() as u64),
        HumanBytes(total_size),
        files_skipped,
        entries_skipped
    );

    Ok(files)
}

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use log::{debug, warn};

use crate::duplicates::ScanResult;

/// Operator-facing actions used while stepping through duplicate groups.
///
/// Injected into `review_duplicates` so the group walk stays portable and
/// testable without a desktop environment. Implementations must not delete
/// anything; deciding which copies to remove is the operator's job.
pub trait Reviewer {
    /// Points the operator at one candidate file, e.g. by selecting it in
    /// the platform file browser.
    fn reveal(&mut self, path: &Path) -> Result<()>;

    /// Blocks until the operator is ready to move on to group `next_group`
    /// of `total_groups`.
    fn pause(&mut self, next_group: usize, total_groups: usize) -> Result<()>;
}

/// Walks the duplicate groups one at a time, revealing every path in the
/// current group and pausing before the next one.
///
/// Files that disappeared between the scan and the review (the operator may
/// already have deleted some copies) are reported and skipped. The scan
/// result itself is never modified.
pub fn review_duplicates(duplicates: &ScanResult, reviewer: &mut dyn Reviewer) -> Result<()> {
    let total_groups = duplicates.len();

    for (idx, (_hash, group)) in duplicates.iter().enumerate() {
        for file in group {
            if file.path.exists() {
                reviewer.reveal(&file.path)?;
            } else {
                warn!("No such file: {}", file.path.display());
            }
        }
        println!(
            "Located the duplicates for group {}/{}; delete the copies you don't need.",
            idx + 1,
            total_groups
        );
        if idx + 1 < total_groups {
            reviewer.pause(idx + 2, total_groups)?;
        } else {
            println!("No more duplicates!");
        }
    }
    Ok(())
}

/// Reveals files in the platform file browser and pauses on stdin.
pub struct FileBrowserReviewer;

impl Reviewer for FileBrowserReviewer {
    fn reveal(&mut self, path: &Path) -> Result<()> {
        debug!("Revealing '{}'", path.display());

        #[cfg(target_os = "windows")]
        Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn()?;

        #[cfg(target_os = "macos")]
        Command::new("open").arg("-R").arg(path).spawn()?;

        #[cfg(all(unix, not(target_os = "macos")))]
        Command::new("xdg-open")
            .arg(path.parent().unwrap_or_else(|| Path::new(".")))
            .spawn()?;

        Ok(())
    }

    fn pause(&mut self, next_group: usize, total_groups: usize) -> Result<()> {
        print!("Press Enter to proceed to group {next_group}/{total_groups}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::find_duplicates;
    use crate::utils::FileInfo;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingReviewer {
        revealed: Vec<PathBuf>,
        pauses: usize,
    }

    impl Reviewer for RecordingReviewer {
        fn reveal(&mut self, path: &Path) -> Result<()> {
            self.revealed.push(path.to_path_buf());
            Ok(())
        }

        fn pause(&mut self, _next_group: usize, _total_groups: usize) -> Result<()> {
            self.pauses += 1;
            Ok(())
        }
    }

    fn on_disk_file(dir: &Path, name: &str, content: &[u8], hash: &str) -> FileInfo {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        FileInfo {
            path,
            size: content.len() as u64,
            hash: hash.to_string(),
        }
    }

    #[test]
    fn reveals_every_path_and_pauses_between_groups() {
        let dir = tempdir().unwrap();
        let result = find_duplicates(vec![
            on_disk_file(dir.path(), "a1", b"aa", "ha"),
            on_disk_file(dir.path(), "a2", b"aa", "ha"),
            on_disk_file(dir.path(), "b1", b"bb", "hb"),
            on_disk_file(dir.path(), "b2", b"bb", "hb"),
        ]);
        assert_eq!(result.len(), 2);

        let mut reviewer = RecordingReviewer::default();
        review_duplicates(&result, &mut reviewer).unwrap();

        assert_eq!(reviewer.revealed.len(), 4);
        // One pause between two groups, none after the last.
        assert_eq!(reviewer.pauses, 1);
    }

    #[test]
    fn vanished_files_are_skipped() {
        let dir = tempdir().unwrap();
        let kept = on_disk_file(dir.path(), "kept", b"cc", "hc");
        let gone = on_disk_file(dir.path(), "gone", b"cc", "hc");
        fs::remove_file(&gone.path).unwrap();

        let result = find_duplicates(vec![kept.clone(), gone]);
        let mut reviewer = RecordingReviewer::default();
        review_duplicates(&result, &mut reviewer).unwrap();

        assert_eq!(reviewer.revealed, vec![kept.path]);
        assert_eq!(reviewer.pauses, 0);
    }

    #[test]
    fn empty_result_does_nothing() {
        let result = find_duplicates(Vec::new());
        let mut reviewer = RecordingReviewer::default();
        review_duplicates(&result, &mut reviewer).unwrap();

        assert!(reviewer.revealed.is_empty());
        assert_eq!(reviewer.pauses, 0);
    }
}

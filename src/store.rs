use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use indicatif::{HumanBytes, HumanCount};
use log::{info, warn};
use zstd::stream::{Encoder, decode_all};

use crate::duplicates::ScanResult;

/// Name of the saved-results file. The scanner skips it by name so a rescan
/// never hashes a previous run's results.
pub const RESULTS_FILE_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "-results.json.zst");

/// Loads a previously saved scan result from `path`.
///
/// Any failure counts as a cache miss: a missing file, undecodable
/// compression, unparsable JSON, or a parsed result that breaks the
/// two-or-more-members group invariant all return `None` (with a warning
/// for corrupt data) so the caller falls back to a fresh scan. Never errors.
pub fn load_results(path: &Path) -> Option<ScanResult> {
    let compressed = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => {
            info!("No saved results at {}", path.display());
            return None;
        }
    };

    info!(
        "Loading saved results from: {} ({})",
        path.display(),
        HumanBytes(compressed.len() as u64)
    );

    let decoded = match decode_all(&compressed[..]) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to decompress saved results ({err}), falling back to a fresh scan");
            return None;
        }
    };

    match serde_json::from_slice::<ScanResult>(&decoded) {
        Ok(result) => {
            // Well-formed results only ever hold groups of two or more;
            // anything smaller means the file was tampered with or truncated.
            if result.iter().any(|(_, group)| group.len() < 2) {
                warn!(
                    "Saved results contain a group with fewer than two files, \
                     falling back to a fresh scan"
                );
                return None;
            }
            info!(
                "Loaded {} duplicate groups from saved results",
                HumanCount(result.len() as u64)
            );
            Some(result)
        }
        Err(err) => {
            warn!("Failed to parse saved results ({err}), falling back to a fresh scan");
            None
        }
    }
}

/// Serializes the scan result to zstd-compressed JSON at `path`.
///
/// Compression uses multiple threads when more than one core is available.
pub fn save_results(path: &Path, result: &ScanResult) -> Result<()> {
    let content = serde_json::to_vec(result)?;
    let file = fs::File::create(path)?;

    let mut encoder = Encoder::new(file, 9)?;
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    if threads > 1 {
        if let Err(err) = encoder.multithread(threads as u32) {
            info!("Failed to enable multi-threaded compression ({err}), using single thread");
        }
    }
    encoder.write_all(&content)?;
    encoder.finish()?;

    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    info!("Saved results to {} ({})", path.display(), HumanBytes(size));
    Ok(())
}

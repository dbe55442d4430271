use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use indicatif::{HumanBytes, HumanCount};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::scanner::scan_directory;
use crate::utils::FileInfo;

/// Duplicate groups keyed by content fingerprint.
///
/// Holds exactly the fingerprints that had two or more files during one
/// scan; groups of one are pruned before construction completes. Built once
/// per scan, never mutated afterwards, and owned by the caller. Within a
/// group, files keep first-seen traversal order; iteration order across
/// groups follows the underlying map and carries no meaning.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    groups: HashMap<String, Vec<FileInfo>>,
}

impl ScanResult {
    /// Number of duplicate groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &[FileInfo])> {
        self.groups.iter().map(|(hash, group)| (hash, group.as_slice()))
    }

    pub fn get(&self, fingerprint: &str) -> Option<&[FileInfo]> {
        self.groups.get(fingerprint).map(Vec::as_slice)
    }
}

/// Groups scanned files by fingerprint and drops every group with a single
/// member (a unique file is not a duplicate of anything).
pub fn find_duplicates(files: Vec<FileInfo>) -> ScanResult {
    info!("Analyzing {} files for duplicates", files.len());

    let mut groups: HashMap<String, Vec<FileInfo>> = HashMap::new();

    for file in files {
        groups.entry(file.hash.clone()).or_default().push(file);
    }

    let total_groups = groups.len();

    // Filter out groups with only one file (no duplicates)
    groups.retain(|_, group| group.len() > 1);

    let duplicate_groups = groups.len();
    let total_duplicates: usize = groups.values().map(|group| group.len() - 1).sum();

    info!(
        "Duplicate analysis complete: {} unique hashes, {} duplicate groups, {} duplicate files",
        total_groups, duplicate_groups, total_duplicates
    );

    ScanResult { groups }
}

/// One-call form of the scan: traverse `root`, hash every regular file,
/// group and prune.
pub fn scan_tree(root: &Path, chunk_size: usize) -> Result<ScanResult> {
    let files = scan_directory(root, chunk_size)?;
    Ok(find_duplicates(files))
}

/// Prints the duplicate report, largest wasted space first, with paths shown
/// relative to the scanned root.
pub fn print_results(duplicates: &ScanResult, base_path: &Path) {
    if duplicates.is_empty() {
        println!("{}", "No duplicate files found!".green());
        return;
    }

    let total_duplicates: usize = duplicates
        .groups
        .values()
        .map(|group| group.len() - 1)
        .sum();
    let total_wasted_space: u64 = duplicates
        .groups
        .values()
        .map(|group| group[0].size * (group.len() - 1) as u64)
        .sum();

    warn!(
        "Found {} duplicate groups: {} redundant files wasting {} of space",
        HumanCount(duplicates.len() as u64),
        HumanCount(total_duplicates as u64),
        HumanBytes(total_wasted_space)
    );

    // Sort duplicate groups by space savings (largest first)
    let mut sorted_groups: Vec<_> = duplicates.groups.iter().collect();
    sorted_groups.sort_by(|a, b| {
        let space_a = a.1[0].size * (a.1.len() - 1) as u64;
        let space_b = b.1[0].size * (b.1.len() - 1) as u64;
        space_b.cmp(&space_a)
    });

    for (_hash, group) in sorted_groups {
        warn!(
            "Duplicate group ({}, {} files):",
            HumanBytes(group[0].size),
            group.len()
        );
        for file in group {
            let relative_path = file.path.strip_prefix(base_path).unwrap_or(&file.path);
            warn!("  {}", relative_path.display());
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dup-review")]
#[command(about = "A CLI tool to find duplicate files in a directory and review them interactively")]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read files in chunks of this many KiB while hashing (I/O tuning only,
    /// the fingerprint does not depend on it)
    #[arg(short, long, default_value_t = 64)]
    pub chunk_kib: usize,

    /// Ignore any saved results file and scan from scratch
    #[arg(short, long)]
    pub rescan: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

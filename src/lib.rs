pub mod cli;
pub mod duplicates;
pub mod hasher;
pub mod review;
pub mod scanner;
pub mod store;
pub mod utils;

pub use cli::Cli;
pub use duplicates::{ScanResult, find_duplicates, print_results, scan_tree};
pub use hasher::{DEFAULT_CHUNK_SIZE, hash_file};
pub use review::{FileBrowserReviewer, Reviewer, review_duplicates};
pub use scanner::scan_directory;
pub use utils::{FileInfo, format_human_elapsed};

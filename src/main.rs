use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, error, info};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use dup_review::{
    Cli, FileBrowserReviewer, find_duplicates, format_human_elapsed, print_results,
    review_duplicates, scan_directory, store,
};

fn init_logger(verbose: bool) -> Result<()> {
    let config = match ConfigBuilder::new().set_time_offset_to_local() {
        Ok(builder) => builder.build(),
        Err(builder) => builder.build(),
    };
    TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();

    init_logger(cli.verbose)?;

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    debug!("Command line arguments: {:?}", cli);

    // Convert to absolute path for better error messages
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", cli.path.display()))?;

    if !root.is_dir() {
        error!("Path is not a directory: {}", root.display());
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    info!("Target directory: '{}'", root.display());

    // Results are saved in the working directory under a fixed name that
    // the scanner skips, so a rescan never hashes the results file itself
    // even when the working directory is the scanned tree.
    let results_file = std::env::current_dir()?.join(store::RESULTS_FILE_NAME);

    let saved = if cli.rescan {
        info!("--rescan given, ignoring any saved results");
        None
    } else {
        store::load_results(&results_file)
    };

    let duplicates = match saved {
        Some(result) => result,
        None => {
            let scan_start = Instant::now();
            let chunk_size = cli.chunk_kib.max(1) * 1024;
            let files = scan_directory(&root, chunk_size)?;
            info!("Scanned {} files", files.len());

            let result = find_duplicates(files);
            store::save_results(&results_file, &result)?;
            info!(
                "Time used to find the duplicates: {}",
                format_human_elapsed(scan_start.elapsed())
            );
            result
        }
    };

    print_results(&duplicates, &root);
    info!("There are {} groups of duplicate files", duplicates.len());

    if !duplicates.is_empty() {
        review_duplicates(&duplicates, &mut FileBrowserReviewer)?;
    }

    info!(
        "Program completed successfully in {}",
        format_human_elapsed(start_time.elapsed())
    );
    Ok(())
}

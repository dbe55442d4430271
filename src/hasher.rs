use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use blake3::Hasher;
use log::debug;

/// Default read granularity for hashing (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Computes the BLAKE3 fingerprint of a file, returned as a 64-character
/// lowercase hex string.
///
/// The file is streamed through the hasher in `chunk_size`-byte reads, so
/// memory use is bounded by `chunk_size` regardless of file size, and the
/// resulting digest is identical for any positive chunk size. A zero-length
/// file yields the BLAKE3 digest of empty input.
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<String> {
    debug!("Calculating hash for: '{}'", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open file: '{}'", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total_bytes = 0;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("Failed to read file: '{}'", path.display()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
        total_bytes += bytes_read;
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!(
        "Hash calculated for '{}': {} ({} bytes)",
        path.display(),
        hash,
        total_bytes
    );

    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // BLAKE3 digest of empty input.
    const EMPTY_HASH: &str = "af1349b9f5f9a1a6a0404dee36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

    #[test]
    fn empty_file_has_well_known_hash() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();

        let hash = hash_file(&path, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(hash, EMPTY_HASH);
    }

    #[test]
    fn identical_content_hashes_equal_regardless_of_name() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("deeply-different-name.dat");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        assert_eq!(
            hash_file(&a, DEFAULT_CHUNK_SIZE).unwrap(),
            hash_file(&b, DEFAULT_CHUNK_SIZE).unwrap()
        );
    }

    #[test]
    fn different_content_hashes_differ() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"content a").unwrap();
        fs::write(&b, b"content b").unwrap();

        assert_ne!(
            hash_file(&a, DEFAULT_CHUNK_SIZE).unwrap(),
            hash_file(&b, DEFAULT_CHUNK_SIZE).unwrap()
        );
    }

    #[test]
    fn hash_is_chunk_size_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data");
        // Larger than the small chunk size so multiple reads happen.
        fs::write(&path, vec![0xAB; 10_000]).unwrap();

        let small = hash_file(&path, 7).unwrap();
        let large = hash_file(&path, DEFAULT_CHUNK_SIZE).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist");
        assert!(hash_file(&path, DEFAULT_CHUNK_SIZE).is_err());
    }
}

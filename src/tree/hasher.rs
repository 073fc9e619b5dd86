//! Content hashing for tracked files and hash combination for parent nodes

use crate::error::TrackError;
use crate::types::{HashAlgorithm, HexHash};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

impl HashAlgorithm {
    /// Stream a reader through the hash and return the lowercase hex digest
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> io::Result<HexHash> {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(reader, &mut hasher)?;
                Ok(hex::encode(hasher.finalize()))
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                io::copy(reader, &mut hasher)?;
                Ok(hasher.finalize().to_hex().to_string())
            }
        }
    }

    /// Hash an in-memory byte slice
    pub fn hash_bytes(&self, data: &[u8]) -> HexHash {
        match self {
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            HashAlgorithm::Blake3 => blake3::hash(data).to_hex().to_string(),
        }
    }

    /// Parent hash: the hash of the two children's hex strings concatenated
    pub fn combine(&self, left: &str, right: &str) -> HexHash {
        let mut combined = String::with_capacity(left.len() + right.len());
        combined.push_str(left);
        combined.push_str(right);
        self.hash_bytes(combined.as_bytes())
    }
}

/// Hash one file, holding its handle only for the duration of the read
pub fn hash_file(algorithm: HashAlgorithm, path: &Path) -> Result<HexHash, TrackError> {
    let mut file = File::open(path).map_err(|e| TrackError::io(path, e))?;
    let hash = algorithm
        .hash_reader(&mut file)
        .map_err(|e| TrackError::io(path, e))?;
    trace!(path = %path.display(), hash = %hash, "Hashed file");
    Ok(hash)
}

/// Hash a batch of files, returning digests in input order.
///
/// With `workers > 1` the batch is split into contiguous slices hashed on
/// scoped threads. Any failure aborts the whole batch; no partial results are
/// returned.
pub fn hash_files(
    algorithm: HashAlgorithm,
    files: &[PathBuf],
    workers: usize,
    cancel: &CancellationToken,
) -> Result<Vec<HexHash>, TrackError> {
    let workers = workers.clamp(1, files.len().max(1));
    if workers == 1 {
        return hash_slice(algorithm, files, cancel);
    }

    let chunk_size = files.len().div_ceil(workers);
    debug!(file_count = files.len(), workers, chunk_size, "Hashing files in parallel");

    // A failing worker cancels its siblings through the batch token without
    // touching the caller's token.
    let batch_cancel = cancel.child_token();
    let results: Vec<Result<Vec<HexHash>, TrackError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                let batch_cancel = &batch_cancel;
                scope.spawn(move || {
                    let result = hash_slice(algorithm, chunk, batch_cancel);
                    if result.is_err() {
                        batch_cancel.cancel();
                    }
                    result
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut hashes = Vec::with_capacity(files.len());
    let mut cancelled = false;
    for result in results {
        match result {
            Ok(chunk_hashes) => hashes.extend(chunk_hashes),
            Err(TrackError::Cancelled) => cancelled = true,
            Err(e) => return Err(e),
        }
    }
    if cancelled {
        return Err(TrackError::Cancelled);
    }
    Ok(hashes)
}

fn hash_slice(
    algorithm: HashAlgorithm,
    files: &[PathBuf],
    cancel: &CancellationToken,
) -> Result<Vec<HexHash>, TrackError> {
    let mut hashes = Vec::with_capacity(files.len());
    for path in files {
        if cancel.is_cancelled() {
            return Err(TrackError::Cancelled);
        }
        hashes.push(hash_file(algorithm, path)?);
    }
    Ok(hashes)
}

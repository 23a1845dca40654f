use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::errors::StimError;

/// Hex encoded SHA-256 digest of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hex encoded SHA-256 digest of a file's contents.
pub fn file_sha256(path: &Path) -> Result<String, StimError> {
    let bytes = fs::read(path).map_err(|err| StimError::from_io("stim.hash_read", path, err))?;
    Ok(sha256_hex(&bytes))
}

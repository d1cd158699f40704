//! MD5 digests for verifying Maven repository downloads.

use std::path::Path;

use crate::error::UtilError;

/// Compute the MD5 hex digest of a byte slice.
pub fn md5_bytes(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Compute the MD5 hex digest of a file using streaming reads.
///
/// Uses a 64 KiB buffer to avoid loading the entire file into memory.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn md5_file(path: &Path) -> Result<String, UtilError> {
    let file = std::fs::File::open(path).map_err(|source| UtilError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = std::io::BufReader::new(file);
    let mut context = md5::Context::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = std::io::Read::read(&mut reader, &mut buf).map_err(|source| UtilError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if n == 0 {
            break;
        }
        let Some(chunk) = buf.get(..n) else {
            break; // unreachable: n is bounded by buf.len()
        };
        context.consume(chunk);
    }
    Ok(format!("{:x}", context.compute()))
}

/// Extract the checksum from the content of a Maven `.md5` sidecar file.
///
/// The sidecar is an ASCII file whose first 32 hex characters are the
/// checksum; some repositories append the file name after it.
///
/// # Errors
/// Returns an error if the content holds fewer than 32 characters or any
/// of the first 32 is not a hex digit.
pub fn parse_checksum(content: &str) -> Result<String, String> {
    let trimmed = content.trim_start();
    let candidate: String = trimmed.chars().take(32).collect();
    if candidate.len() < 32 {
        return Err(format!(
            "expected 32 hex characters, found {}",
            candidate.len()
        ));
    }
    if let Some(bad) = candidate.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("non-hex character `{bad}` in checksum"));
    }
    Ok(candidate.to_ascii_lowercase())
}

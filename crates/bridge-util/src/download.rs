//! MD5-verified downloads from a Maven-style repository.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use crate::error::UtilError;
use crate::maven::MavenCoordinate;
use crate::md5sum;

/// Resolves a `(coordinate, file name)` pair to a local file.
///
/// `Ok(None)` means the remote reported the file absent (HTTP 404).
/// Implementations must not hand back unverified bytes: a file that is
/// present but fails checksum verification is an error, not an absence.
pub trait Fetch {
    /// Fetch one of the coordinate's files, verifying its MD5 sidecar.
    ///
    /// # Errors
    /// Returns an error on transport failure, unexpected HTTP status, a
    /// malformed checksum file, or a checksum mismatch.
    fn fetch(
        &self,
        coordinate: &MavenCoordinate,
        file_name: &str,
    ) -> Result<Option<PathBuf>, UtilError>;
}

/// HTTP fetcher against a Maven-style repository.
///
/// Downloads land in a private temp directory that lives as long as the
/// fetcher; a monotonic counter keeps paths fresh so repeated fetches of
/// equal file names never collide.
pub struct HttpFetcher {
    agent: ureq::Agent,
    base_url: String,
    temp_dir: tempfile::TempDir,
    counter: Cell<u64>,
    debug: bool,
}

impl HttpFetcher {
    /// Create a fetcher for the given repository base URL.
    ///
    /// # Errors
    /// Returns an error if the temp directory cannot be created.
    pub fn new(base_url: &str, debug: bool) -> Result<Self, UtilError> {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_connect(Some(std::time::Duration::from_secs(30)))
                .timeout_global(Some(std::time::Duration::from_secs(600)))
                .build(),
        );
        let temp_dir = tempfile::tempdir().map_err(|source| UtilError::Io {
            path: std::env::temp_dir().display().to_string(),
            source,
        })?;
        Ok(Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            temp_dir,
            counter: Cell::new(0),
            debug,
        })
    }

    fn fresh_path(&self, file_name: &str) -> PathBuf {
        let n = self.counter.get();
        self.counter.set(n + 1);
        self.temp_dir.path().join(format!("{n}-{file_name}"))
    }

    /// Stream a URL to `dest`, computing MD5 on the fly.
    ///
    /// Returns the hex digest, or `None` when the remote answered 404.
    fn download(&self, url: &str, dest: &Path) -> Result<Option<String>, UtilError> {
        if self.debug {
            println!("Downloading {url}");
        }

        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(ureq::Error::StatusCode(status)) => {
                return Err(UtilError::UnexpectedStatus {
                    url: url.to_owned(),
                    status,
                })
            }
            Err(e) => {
                return Err(UtilError::Download {
                    url: url.to_owned(),
                    message: e.to_string(),
                })
            }
        };

        let mut body = response.into_body();
        let mut file = std::fs::File::create(dest).map_err(|source| UtilError::Io {
            path: dest.display().to_string(),
            source,
        })?;

        let mut context = md5::Context::new();
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            let n = std::io::Read::read(&mut body.as_reader(), &mut buf).map_err(|e| {
                UtilError::Download {
                    url: url.to_owned(),
                    message: e.to_string(),
                }
            })?;
            if n == 0 {
                break;
            }
            let Some(chunk) = buf.get(..n) else {
                break; // unreachable: n is bounded by buf.len()
            };
            std::io::Write::write_all(&mut file, chunk).map_err(|source| UtilError::Io {
                path: dest.display().to_string(),
                source,
            })?;
            context.consume(chunk);
        }

        Ok(Some(format!("{:x}", context.compute())))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(
        &self,
        coordinate: &MavenCoordinate,
        file_name: &str,
    ) -> Result<Option<PathBuf>, UtilError> {
        let path = coordinate.repository_path(file_name);
        let url = format!("{}/{path}", self.base_url);
        let md5_url = format!("{url}.md5");

        // The sidecar goes first: a missing .md5 means the artifact does
        // not exist in the repository at all.
        let md5_path = self.fresh_path(&format!("{file_name}.md5"));
        if self.download(&md5_url, &md5_path)?.is_none() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&md5_path).map_err(|source| UtilError::Io {
                path: md5_path.display().to_string(),
                source,
            })?;
        let expected =
            md5sum::parse_checksum(&content).map_err(|message| UtilError::InvalidChecksumFile {
                url: md5_url.clone(),
                message,
            })?;

        let dest = self.fresh_path(file_name);
        let Some(actual) = self.download(&url, &dest)? else {
            return Ok(None);
        };

        if actual != expected {
            return Err(UtilError::Md5Mismatch {
                url,
                expected,
                actual,
            });
        }

        Ok(Some(dest))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fresh_paths_never_collide() {
        let fetcher = HttpFetcher::new("https://repo.invalid/maven2", false).unwrap();
        let a = fetcher.fresh_path("widget-1.0.jar");
        let b = fetcher.fresh_path("widget-1.0.jar");
        assert_ne!(a, b);
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let fetcher = HttpFetcher::new("https://repo.invalid/maven2/", false).unwrap();
        assert_eq!(fetcher.base_url, "https://repo.invalid/maven2");
    }
}

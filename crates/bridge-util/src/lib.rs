#![forbid(unsafe_code)]
//! Maven coordinates, MD5 verification, HTTP fetching, and filesystem
//! helpers for the Maven-to-Savant bridge.

pub mod download;
pub mod error;
pub mod fs;
pub mod maven;
pub mod md5sum;

pub use download::{Fetch, HttpFetcher};
pub use error::UtilError;
pub use maven::MavenCoordinate;

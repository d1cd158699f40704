#![forbid(unsafe_code)]
//! POM parsing and property resolution for the Maven-to-Savant bridge.

pub mod error;
pub mod pom;
pub mod properties;

pub use error::PomError;
pub use pom::{Pom, PomDependency};

#![forbid(unsafe_code)]
//! The import engine: coordinate mapping and the recursive graph walk
//! that drives fetching, conversion, and publishing.

pub mod bridge;
pub mod config;
pub mod console;
pub mod error;

pub use bridge::{MavenNode, SavantBridge};
pub use config::BridgeConfig;
pub use console::{Console, StdConsole};
pub use error::BridgeError;

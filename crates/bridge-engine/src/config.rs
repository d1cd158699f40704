//! Runtime configuration for one bridge invocation.

/// Settings sampled once at startup. The prompt flag comes from the
/// `SAVANT_BRIDGE_PROMPT` environment variable and is never re-read.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Interactive mode: confirmations, overrides, and warnings.
    pub prompt: bool,
    /// Print download URLs, POM contents, and generated AMD XML.
    pub debug: bool,
    /// Keep dependencies with Maven scope `test`.
    pub include_test_dependencies: bool,
    /// Keep dependencies marked `<optional>true</optional>`.
    pub include_optional_dependencies: bool,
}

impl BridgeConfig {
    /// Build the configuration from the environment. Prompting is on
    /// unless `SAVANT_BRIDGE_PROMPT` is set to something other than
    /// `"true"`.
    pub fn from_env(debug: bool) -> Self {
        let prompt = match std::env::var("SAVANT_BRIDGE_PROMPT") {
            Err(_) => true,
            Ok(value) => value == "true",
        };
        Self {
            prompt,
            debug,
            include_test_dependencies: false,
            include_optional_dependencies: false,
        }
    }
}

//! Configuration
//!
//! Layered configuration for a file tree handle: built-in defaults, an
//! optional TOML file, then `FILETREE__*` environment variables.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

fn default_verify_invariants() -> bool {
    cfg!(debug_assertions)
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTreeConfig {
    /// Run the invariant checker after every mutation (debug builds only)
    #[serde(default = "default_verify_invariants")]
    pub verify_invariants: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for FileTreeConfig {
    fn default() -> Self {
        Self {
            verify_invariants: default_verify_invariants(),
            logging: LoggingConfig::default(),
        }
    }
}

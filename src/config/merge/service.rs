//! MergeService: orchestrates sources, applies merge policy, deserializes to FileTreeConfig.

use crate::config::sources::{environment, file};
use crate::config::FileTreeConfig;
use crate::error::ApiError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from defaults and environment.
    pub fn load() -> Result<FileTreeConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load config from a specific file with environment overlay.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<FileTreeConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

//! Environment variable source: FILETREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses FILETREE prefix and __ as separator for nested keys,
/// e.g. `FILETREE__LOGGING__LEVEL=debug`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FILETREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}

//! Config layering: defaults, then a file, then the environment overlay.

use super::{TilefolioConfig, CONFIG_FILE_NAME};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Environment prefix; nested keys use `__`, e.g. `TILEFOLIO__CONTENT__ROOT`.
pub const ENV_PREFIX: &str = "TILEFOLIO";

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("content.root", "content")?
        .set_default("content.extension", "txt")?
        .set_default("snapshot.path", "generated/contentData.json")?
        .set_default("snapshot.pretty", true)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}

/// `TILEFOLIO_LOG*` stay with the logger; the double-underscore prefix
/// separator keeps them out of this overlay.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<TilefolioConfig, ConfigError> {
    builder.add_source(environment()).build()?.try_deserialize()
}

/// Defaults < optional `<workspace>/tilefolio.toml` < environment.
pub fn load_workspace(workspace_root: &Path) -> Result<TilefolioConfig, ConfigError> {
    let file = File::from(workspace_root.join(CONFIG_FILE_NAME)).required(false);
    finish(defaults()?.add_source(file))
}

/// Defaults < the given file (required) < environment.
pub fn load_file(path: &Path) -> Result<TilefolioConfig, ConfigError> {
    finish(defaults()?.add_source(File::from(path)))
}

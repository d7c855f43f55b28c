pub use config::Map;

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENV_PREFIX: &str = "CAMPUS";

#[campus_derive::campus_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from an optional config file overlaid with `CAMPUS__` environment variables.
///
/// `path` defaults to `server` (any extension the `config` crate understands, so
/// `server.toml` is picked up). A missing file is not an error. Nested keys use double
/// underscores: `CAMPUS__DATABASE__URL` sets `database.url`.
///
/// # Errors
/// Fails when the file cannot be parsed or the merged values do not fit `T`.
///
/// ```rust
/// use campus_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with(path, None)
}

/// Like [`load_config`], but reads the `CAMPUS__` variables from `vars` when given
/// instead of the process environment.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());
    info!(path = %path.display(), "Loading config");

    Config::builder()
        .add_source(File::from(path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()
        .context("Building config")?
        .try_deserialize::<T>()
        .context("Deserializing config")
}

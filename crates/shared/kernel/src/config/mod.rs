use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `FACESYNC__LATENCY_MS=80`.
pub const ENV_PREFIX: &str = "FACESYNC";
const DEFAULT_CONFIG_FILE: &str = "fonts";

/// Custom error type for config loading.
#[facesync_derive::facesync_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration object from a file layered with environment overrides.
///
/// 1. **Base File**: `path`, or `fonts` (any supported extension) in the working
///    directory. The file is optional; a missing file yields the type's defaults
///    for every field marked `#[serde(default)]`.
/// 2. **Environment Overrides**: variables prefixed with `FACESYNC__`; nested keys
///    use double underscores (`FACESYNC__FALLBACK__COLOR` maps to `fallback.color`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if a source cannot be parsed or the merged
/// values do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use facesync_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct HostConfig {
///     latency_ms: u64,
/// }
///
/// let cfg: HostConfig = load_config(Some("config/missing")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), "Loading font provider config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

//! Facade crate for facesync.
//! Re-exports the shared primitives and the feature slices, and composes them into
//! a provider mounted from layered configuration.
//! Keep this crate thin: it should compose other crates, not implement behavior.
//!
//! ## Usage
//! ```rust,ignore
//! use facesync::{BindingRequest, FontBinder, mount_configured};
//!
//! let provider = mount_configured(engine, Some("fonts"), raw_faces).await?;
//! let binder = FontBinder::new(&provider, resolver)?;
//! binder.request(BindingRequest::named("Ubuntu", Some(node))).await;
//! ```

use std::borrow::Cow;
use std::path::Path;
use tracing::info;

pub use facesync_binding::{
    Animator, BindError, BindOutcome, BindingRequest, BindingResult, FadeTransition, FontBinder,
    NodeHandleResolver, TimerAnimator, lookup,
};
pub use facesync_context as context;
pub use facesync_domain as domain;
pub use facesync_faces::{FaceError, FaceValidator, parse_raw_faces};
pub use facesync_kernel as kernel;
#[cfg(feature = "logger")]
pub use facesync_logger as logger;
pub use facesync_provider::{
    EngineError, FontEngine, FontsProvider, ProviderBuilder, SyncError, SyncOutcome,
};

use facesync_domain::RawFaces;
use facesync_domain::config::ProviderConfig;
use facesync_kernel::config::{ConfigError, load_config};

/// Build-time enabled features (by Cargo feature).
pub const ENABLED: &[&str] = &[
    "provider",
    "binding",
    #[cfg(feature = "logger")]
    "logger",
];

#[must_use]
pub fn is_enabled(name: &str) -> bool {
    ENABLED.contains(&name)
}

#[facesync_derive::facesync_error]
pub enum FacesyncError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Font provider error{}: {source}", format_context(.context))]
    Sync { source: SyncError, context: Option<Cow<'static, str>> },
}

/// Loads [`ProviderConfig`] from `path` (plus `FACESYNC__*` overrides).
///
/// # Errors
/// Returns [`FacesyncError::Config`] when the sources cannot be parsed.
pub fn load_provider_config(path: Option<impl AsRef<Path>>) -> Result<ProviderConfig, FacesyncError> {
    Ok(load_config(path)?)
}

/// Mounts a provider for `engine` configured from `path` and syncs `font_faces`.
///
/// Failures of the initial sync are not errors; they show up in the provider's phase.
///
/// # Errors
/// Returns [`FacesyncError::Config`] for unreadable configuration and
/// [`FacesyncError::Sync`] if the provider cannot publish its state.
pub async fn mount_configured<E: FontEngine>(
    engine: E,
    path: Option<impl AsRef<Path>>,
    font_faces: RawFaces,
) -> Result<FontsProvider<E>, FacesyncError> {
    let config = load_provider_config(path)?;
    info!(platform = ?config.platform, latency_ms = config.latency_ms, "Mounting font provider");

    let provider =
        FontsProvider::builder(engine).config(&config).font_faces(font_faces).mount().await?;
    Ok(provider)
}

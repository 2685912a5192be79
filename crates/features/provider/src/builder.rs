use crate::engine::FontEngine;
use crate::error::SyncError;
use crate::listeners::DownloadListeners;
use crate::provider::FontsProvider;
use facesync_context::ContextBus;
use facesync_domain::config::{DEFAULT_FADE_DURATION_MS, DEFAULT_LATENCY_MS, ProviderConfig};
use facesync_domain::events::DownloadEvent;
use facesync_domain::{FallbackStyle, RawFaces};
use facesync_kernel::platform::Platform;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configures a [`FontsProvider`] before it is mounted.
#[must_use = "The builder must be mounted or built to create a provider."]
#[derive(Debug)]
pub struct ProviderBuilder<E: FontEngine> {
    pub(crate) engine: Arc<E>,
    pub(crate) font_faces: RawFaces,
    pub(crate) platform: Platform,
    pub(crate) latency: Duration,
    pub(crate) fade_duration: Duration,
    pub(crate) fallback: Option<FallbackStyle>,
    pub(crate) bus: Option<ContextBus>,
    pub(crate) listeners: DownloadListeners,
}

impl<E: FontEngine> ProviderBuilder<E> {
    pub(crate) fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            font_faces: RawFaces::new(),
            platform: Platform::default(),
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            fade_duration: Duration::from_millis(DEFAULT_FADE_DURATION_MS),
            fallback: None,
            bus: None,
            listeners: DownloadListeners::default(),
        }
    }

    /// The registry synchronized on mount.
    pub fn font_faces(mut self, raw: RawFaces) -> Self {
        self.font_faces = raw;
        self
    }

    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Grace period before node applies on platforms with deferred handles.
    pub const fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub const fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Replaces the platform default fallback style.
    pub fn fallback(mut self, fallback: FallbackStyle) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Applies loaded registration options.
    pub fn config(mut self, config: &ProviderConfig) -> Self {
        self.platform = Platform::from_kind(config.platform);
        self.latency = config.latency();
        self.fade_duration = config.fade_duration();
        if let Some(fallback) = &config.fallback {
            self.fallback = Some(fallback.clone());
        }
        self
    }

    /// Publishes on a host-owned bus instead of a private one.
    ///
    /// A shared bus is left open when the provider shuts down.
    pub fn context_bus(mut self, bus: ContextBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn on_download_did_start(mut self, f: impl Fn(&DownloadEvent) + Send + Sync + 'static) -> Self {
        self.listeners.did_start = Some(Arc::new(f));
        self
    }

    pub fn on_download_did_end(mut self, f: impl Fn(&DownloadEvent) + Send + Sync + 'static) -> Self {
        self.listeners.did_end = Some(Arc::new(f));
        self
    }

    pub fn on_download_did_error(mut self, f: impl Fn(&SyncError) + Send + Sync + 'static) -> Self {
        self.listeners.did_error = Some(Arc::new(f));
        self
    }

    /// Creates the provider without synchronizing anything.
    ///
    /// The published state starts empty, with the configured fallback.
    ///
    /// # Errors
    /// Returns [`SyncError::Context`] if the bus already carries font state.
    pub fn build(self) -> Result<FontsProvider<E>, SyncError> {
        FontsProvider::from_builder(self).map(|(provider, _)| provider)
    }

    /// Creates the provider and synchronizes the initial registry, if any.
    ///
    /// Failures of the initial sync are reported through the error callback and
    /// leave the provider mounted in the `Rejected` or `Failed` phase.
    ///
    /// # Errors
    /// Returns [`SyncError::Context`] if the bus already carries font state.
    pub async fn mount(self) -> Result<FontsProvider<E>, SyncError> {
        let (provider, initial) = FontsProvider::from_builder(self)?;

        if initial.is_empty() {
            debug!("Mounted with an empty registry; nothing to sync");
            return Ok(provider);
        }

        match provider.update(&initial).await {
            Ok(outcome) => debug!(?outcome, "Initial registry synced"),
            // Already reported through the error listener.
            Err(err) => debug!(error = %err, "Initial registry not synced"),
        }
        Ok(provider)
    }
}

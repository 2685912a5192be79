use crate::platform::PlatformKind;
use crate::style::FallbackStyle;
use serde::Deserialize;
use std::time::Duration;

/// Grace period before a node apply on platforms with deferred handles.
pub const DEFAULT_LATENCY_MS: u64 = 50;
/// Duration of each half of the fade transition.
pub const DEFAULT_FADE_DURATION_MS: u64 = 250;

/// Registration-time options of the font provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub platform: PlatformKind,
    pub latency_ms: u64,
    pub fade_duration_ms: u64,
    /// Overrides the platform default fallback style.
    pub fallback: Option<FallbackStyle>,
}

impl ProviderConfig {
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            platform: PlatformKind::default(),
            latency_ms: DEFAULT_LATENCY_MS,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
            fallback: None,
        }
    }
}

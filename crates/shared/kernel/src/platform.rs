//! The single policy point for platform-dependent font behavior.
//!
//! A [`Platform`] is chosen once when the provider is built and handed to every
//! component that needs it, so the registration path, the default fallback and the
//! binders all agree on weight casing and style suppression.

use facesync_domain::face::{DEFAULT_FONT_WEIGHT, FaceDescriptor};
use facesync_domain::platform::{PlatformCaps, PlatformKind};
use facesync_domain::style::{FallbackStyle, Style, StyleMap};
use std::borrow::Cow;
use std::time::Duration;

const DEFAULT_COLOR: &str = "#000000";

/// Opacity a node rests at when fully revealed.
pub const OPAQUE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    caps: PlatformCaps,
    system_family: &'static str,
}

impl Platform {
    /// Verbatim weights, declarative font props, fade on swap.
    #[must_use]
    pub const fn ios() -> Self {
        Self { caps: PlatformCaps::APPLE, system_family: "System" }
    }

    /// Lowercase weights, imperative typefaces, deferred node handles.
    #[must_use]
    pub const fn android() -> Self {
        Self { caps: PlatformCaps::ANDROID, system_family: "sans-serif" }
    }

    /// A custom capability set, e.g. for hosts other than the two presets.
    #[must_use]
    pub const fn with_caps(caps: PlatformCaps) -> Self {
        Self { caps, system_family: "System" }
    }

    #[must_use]
    pub const fn from_kind(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Ios => Self::ios(),
            PlatformKind::Android => Self::android(),
        }
    }

    #[must_use]
    pub const fn caps(self) -> PlatformCaps {
        self.caps
    }

    /// Maps a human-readable weight to the engine's expected token.
    #[must_use]
    pub fn normalize_weight(self, weight: &str) -> Cow<'_, str> {
        if self.caps.contains(PlatformCaps::LOWERCASE_WEIGHTS) {
            Cow::Owned(weight.to_lowercase())
        } else {
            Cow::Borrowed(weight)
        }
    }

    /// Whether resolved styles must omit `fontFamily`/`fontWeight`.
    #[must_use]
    pub const fn suppresses_font_props(self) -> bool {
        self.caps.contains(PlatformCaps::IMPERATIVE_TYPEFACE)
    }

    /// Delay before a node apply, if this platform needs one.
    #[must_use]
    pub const fn apply_delay(self, latency: Duration) -> Option<Duration> {
        if self.caps.contains(PlatformCaps::DEFERRED_HANDLES) && !latency.is_zero() {
            Some(latency)
        } else {
            None
        }
    }

    /// Opacity a node fades toward while its face is being swapped.
    #[must_use]
    pub const fn transition_opacity(self) -> f32 {
        if self.caps.contains(PlatformCaps::FADE_ON_SWAP) { 0.0 } else { OPAQUE }
    }

    /// The fallback used when the application does not configure one.
    #[must_use]
    pub fn default_fallback(self) -> FallbackStyle {
        FallbackStyle {
            color: DEFAULT_COLOR.to_owned(),
            font_family: self.system_family.to_owned(),
            font_weight: self.normalize_weight(DEFAULT_FONT_WEIGHT).into_owned(),
            extra: StyleMap::new(),
        }
    }

    /// The declarative style safe to expose once `face` is bound to a node.
    ///
    /// `weight` is the weight that was sent to the engine.
    #[must_use]
    pub fn face_style(self, face: &FaceDescriptor, weight: &str) -> Style {
        let style = Style { font_family: None, font_weight: None, extra: face.extra().clone() };
        if self.suppresses_font_props() {
            style
        } else {
            style.font_family(face.font_family()).font_weight(weight)
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::from_kind(PlatformKind::default())
    }
}

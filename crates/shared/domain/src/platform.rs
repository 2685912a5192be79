use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Font-engine behaviors that differ between platform families.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PlatformCaps: u32 {
        /// The engine expects lowercase weight tokens (`"bold"`, not `"Bold"`).
        const LOWERCASE_WEIGHTS = 1 << 0;
        /// Typefaces are assigned imperatively to the native node; declaring
        /// `fontFamily`/`fontWeight` as style props as well double-applies them.
        const IMPERATIVE_TYPEFACE = 1 << 1;
        /// A node's native handle is not durable until after a render pass.
        const DEFERRED_HANDLES = 1 << 2;
        /// Style swaps fade the node out before revealing the new face.
        const FADE_ON_SWAP = 1 << 3;

        const APPLE = Self::FADE_ON_SWAP.bits();
        const ANDROID = Self::LOWERCASE_WEIGHTS.bits()
            | Self::IMPERATIVE_TYPEFACE.bits()
            | Self::DEFERRED_HANDLES.bits();
    }
}

/// Platform family named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Ios,
    Android,
}

impl PlatformKind {
    #[must_use]
    pub const fn caps(self) -> PlatformCaps {
        match self {
            Self::Ios => PlatformCaps::APPLE,
            Self::Android => PlatformCaps::ANDROID,
        }
    }
}

impl Serialize for PlatformCaps {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for PlatformCaps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

use crate::registry::Registry;
use crate::style::FallbackStyle;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The unit published to consumers: the settled registry and the fallback style.
///
/// `generation` increases with every publish and is how consumers tell snapshots
/// apart without comparing registries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    pub generation: u64,
    pub font_faces: Arc<Registry>,
    pub fallback: Arc<FallbackStyle>,
}

impl SyncState {
    /// The degraded state: no custom faces, only the fallback.
    #[must_use]
    pub fn empty(generation: u64, fallback: Arc<FallbackStyle>) -> Self {
        Self { generation, font_faces: Arc::new(Registry::empty()), fallback }
    }
}

/// Where the synchronizer is in handling its latest update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyncPhase {
    Idle,
    Validating,
    Syncing { sequence: u64 },
    Settled { sequence: u64 },
    Rejected,
    Failed { sequence: u64 },
}

impl SyncPhase {
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Syncing { .. })
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Validating => f.write_str("validating"),
            Self::Syncing { sequence } => write!(f, "syncing#{sequence}"),
            Self::Settled { sequence } => write!(f, "settled#{sequence}"),
            Self::Rejected => f.write_str("rejected"),
            Self::Failed { sequence } => write!(f, "failed#{sequence}"),
        }
    }
}

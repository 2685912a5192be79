//! Lifecycle notifications emitted by the registry synchronizer.

use serde::Serialize;
use std::sync::Arc;

/// A download lifecycle transition.
///
/// `sequence` identifies the registry update the event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum DownloadEvent {
    Started { sequence: u64, faces: usize },
    Finished { sequence: u64, faces: usize },
    Failed { sequence: Option<u64>, reason: Arc<str> },
}

impl DownloadEvent {
    #[must_use]
    pub const fn sequence(&self) -> Option<u64> {
        match self {
            Self::Started { sequence, .. } | Self::Finished { sequence, .. } => Some(*sequence),
            Self::Failed { sequence, .. } => *sequence,
        }
    }
}

use crate::error::SyncError;
use facesync_domain::events::DownloadEvent;
use std::fmt;
use std::sync::Arc;

pub type DownloadListener = Arc<dyn Fn(&DownloadEvent) + Send + Sync>;
pub type ErrorListener = Arc<dyn Fn(&SyncError) + Send + Sync>;

/// Application callbacks for the download lifecycle. Unset callbacks are no-ops.
#[derive(Clone, Default)]
pub struct DownloadListeners {
    pub(crate) did_start: Option<DownloadListener>,
    pub(crate) did_end: Option<DownloadListener>,
    pub(crate) did_error: Option<ErrorListener>,
}

impl DownloadListeners {
    pub(crate) fn started(&self, event: &DownloadEvent) {
        if let Some(listener) = &self.did_start {
            listener(event);
        }
    }

    pub(crate) fn finished(&self, event: &DownloadEvent) {
        if let Some(listener) = &self.did_end {
            listener(event);
        }
    }

    pub(crate) fn failed(&self, error: &SyncError) {
        if let Some(listener) = &self.did_error {
            listener(error);
        }
    }
}

impl fmt::Debug for DownloadListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadListeners")
            .field("did_start", &self.did_start.is_some())
            .field("did_end", &self.did_end.is_some())
            .field("did_error", &self.did_error.is_some())
            .finish()
    }
}

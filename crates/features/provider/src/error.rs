use crate::engine::EngineError;
use facesync_context::ContextError;
use facesync_faces::FaceError;
use std::borrow::Cow;

/// Errors surfaced by the registry synchronizer.
#[facesync_derive::facesync_error]
pub enum SyncError {
    /// The raw registry failed validation; the settled state is unchanged.
    #[error("Rejected font-face registry{}: {source}", format_context(.context))]
    InvalidDescriptor { source: FaceError, context: Option<Cow<'static, str>> },

    /// The engine rejected the bulk apply; consumers fall back to the empty state.
    #[error("Font engine failed to sync the registry{}: {source}", format_context(.context))]
    EngineSyncFailure { source: EngineError, context: Option<Cow<'static, str>> },

    /// The shared context could not be provided or written.
    #[error("Shared context error{}: {source}", format_context(.context))]
    Context { source: ContextError, context: Option<Cow<'static, str>> },

    /// The provider has been shut down.
    #[error("Font provider is shut down{}: {message}", format_context(.context))]
    ShutDown { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SyncError {
    /// The raw descriptor field at fault, for validation failures.
    #[must_use]
    pub fn invalid_field(&self) -> Option<&str> {
        match self {
            Self::InvalidDescriptor { source, .. } => source.field(),
            _ => None,
        }
    }
}

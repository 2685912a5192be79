//! The external font engine seam.

use facesync_domain::FaceDescriptor;
use facesync_domain::node::NativeHandle;
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

/// Failure reported by a font engine implementation.
#[facesync_derive::facesync_error]
#[derive(Clone)]
pub enum EngineError {
    /// The engine refused the request (download failed, face unknown, node gone).
    #[error("Font engine rejected the request{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Unexpected engine fault.
    #[error("Font engine fault{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EngineError {
    /// Shorthand for [`EngineError::Rejected`].
    pub fn rejected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { message: message.into(), context: None }
    }
}

/// The native service that downloads, registers and applies typefaces.
///
/// Both calls are suspension points; everything else in facesync is synchronous.
pub trait FontEngine: Send + Sync + 'static {
    /// Replaces the engine's entire set of registered faces with `faces`.
    ///
    /// Must be idempotent: the same set applied twice leaves the engine unchanged.
    fn apply_faces(
        &self,
        faces: &[FaceDescriptor],
    ) -> impl Future<Output = Result<(), EngineError>> + Send;

    /// Binds a registered face to one mounted node.
    fn apply_face_to_node(
        &self,
        handle: NativeHandle,
        font_family: &str,
        font_weight: &str,
    ) -> impl Future<Output = Result<(), EngineError>> + Send;
}

impl<E: FontEngine> FontEngine for Arc<E> {
    fn apply_faces(
        &self,
        faces: &[FaceDescriptor],
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        (**self).apply_faces(faces)
    }

    fn apply_face_to_node(
        &self,
        handle: NativeHandle,
        font_family: &str,
        font_weight: &str,
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        (**self).apply_face_to_node(handle, font_family, font_weight)
    }
}

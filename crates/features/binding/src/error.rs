use facesync_provider::EngineError;
use std::borrow::Cow;

/// Per-node binding failures. They are logged and resolved to the fallback style,
/// never returned to the consumer.
#[facesync_derive::facesync_error]
#[derive(Clone)]
pub enum BindError {
    /// The node had no native handle when the apply was due.
    #[error("Unknown font family{}: {message}", format_context(.context))]
    UnknownFontFamily { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Font engine failed to bind the face{}: {source}", format_context(.context))]
    EngineBindFailure { source: EngineError, context: Option<Cow<'static, str>> },
}

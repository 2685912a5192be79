use std::borrow::Cow;

/// Errors that can occur while providing or consuming shared context.
#[facesync_derive::facesync_error]
pub enum ContextError {
    /// An internal dynamic cast failed; the registry holds a different type under this id.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Nothing has been provided for the requested value type.
    #[error("Context not provided{}: {message}", format_context(.context))]
    NotProvided { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value has already been provided for this type.
    #[error("Context already provided{}: {message}", format_context(.context))]
    AlreadyProvided { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The channel exists but with a different kind (snapshot/notification).
    #[error("Channel kind mismatch{}: {message}", format_context(.context))]
    ChannelKindMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero for notification channels.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

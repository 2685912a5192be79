use std::borrow::Cow;

/// Errors raised while turning a raw descriptor mapping into a registry.
#[facesync_derive::facesync_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FaceError {
    /// A descriptor field is missing or has the wrong shape. `field` names the
    /// raw key (`uri`, `fontFamily`, `fontWeight`) or `descriptor` for a
    /// non-object entry; `context` carries the logical name.
    #[error("Invalid descriptor{}: field `{field}`", format_context(.context))]
    InvalidDescriptor { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The raw registry text is not a JSON object.
    #[error("Malformed registry{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FaceError {
    /// The offending raw field, for `InvalidDescriptor`.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidDescriptor { field, .. } => Some(field),
            Self::Malformed { .. } => None,
        }
    }
}

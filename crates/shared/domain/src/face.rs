use crate::style::StyleMap;
use serde::Serialize;

/// Raw descriptor key holding the download location.
pub const URI_KEY: &str = "uri";
/// Raw descriptor key holding the family name registered with the engine.
pub const FONT_FAMILY_KEY: &str = "fontFamily";
/// Raw descriptor key holding the human-readable weight.
pub const FONT_WEIGHT_KEY: &str = "fontWeight";
/// Weight assumed when a raw descriptor does not name one.
pub const DEFAULT_FONT_WEIGHT: &str = "Normal";

/// A validated, normalized description of one downloadable typeface variant.
///
/// Descriptors are immutable once built; replacing a face means building a new
/// descriptor under the same logical name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDescriptor {
    logical_name: String,
    source_uri: String,
    font_family: String,
    font_weight: String,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    extra: StyleMap,
}

impl FaceDescriptor {
    /// Assembles a descriptor from already validated parts.
    ///
    /// Callers are expected to have checked the fields; use the validator in
    /// `facesync-faces` to build descriptors from untrusted input.
    #[must_use]
    pub const fn from_parts(
        logical_name: String,
        source_uri: String,
        font_family: String,
        font_weight: String,
        extra: StyleMap,
    ) -> Self {
        Self { logical_name, source_uri, font_family, font_weight, extra }
    }

    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    #[must_use]
    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Weight in the platform's normalized form.
    #[must_use]
    pub fn font_weight(&self) -> &str {
        &self.font_weight
    }

    /// Additional style attributes carried verbatim from the raw descriptor.
    #[must_use]
    pub const fn extra(&self) -> &StyleMap {
        &self.extra
    }
}

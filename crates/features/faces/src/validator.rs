//! # Descriptor Validation
//!
//! Turns the application's raw `logicalName -> descriptor` mapping into a
//! [`Registry`]. Validation is all-or-nothing: the first invalid entry fails the
//! whole mapping and no partial registry is produced.
//!
//! ## Rules
//! 1. `uri` must be a non-empty string.
//! 2. `fontFamily` must be a non-empty string.
//! 3. `fontWeight` may be absent (defaults to `"Normal"`) or any string, the empty
//!    string included; it is then normalized for the platform.
//! 4. Every other key is kept verbatim as an extra style attribute.

use crate::error::FaceError;
use facesync_domain::face::{
    DEFAULT_FONT_WEIGHT, FONT_FAMILY_KEY, FONT_WEIGHT_KEY, FaceDescriptor, URI_KEY,
};
use facesync_domain::style::StyleMap;
use facesync_domain::{RawFaces, Registry};
use facesync_kernel::platform::Platform;
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

const DESCRIPTOR_FIELD: &str = "descriptor";

/// Validates and normalizes raw descriptors for one platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceValidator {
    platform: Platform,
}

impl FaceValidator {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Validates every entry of `raw` and builds a registry from them.
    ///
    /// # Errors
    /// Returns [`FaceError::InvalidDescriptor`] for the first invalid entry, with the
    /// entry's logical name as context.
    pub fn validate(&self, raw: &RawFaces) -> Result<Registry, FaceError> {
        let descriptors = raw
            .iter()
            .map(|(name, descriptor)| self.validate_descriptor(name, descriptor))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(faces = descriptors.len(), "Validated font-face registry");
        Ok(Registry::from_descriptors(descriptors))
    }

    /// Validates a single raw descriptor registered under `logical_name`.
    ///
    /// # Errors
    /// Returns [`FaceError::InvalidDescriptor`] naming the offending field.
    pub fn validate_descriptor(
        &self,
        logical_name: &str,
        raw: &Value,
    ) -> Result<FaceDescriptor, FaceError> {
        let invalid = |field: &'static str| FaceError::InvalidDescriptor {
            field: Cow::Borrowed(field),
            context: Some(Cow::Owned(logical_name.to_owned())),
        };

        let Value::Object(fields) = raw else {
            return Err(invalid(DESCRIPTOR_FIELD));
        };

        let uri = non_empty_str(fields.get(URI_KEY)).ok_or_else(|| invalid(URI_KEY))?;
        let family =
            non_empty_str(fields.get(FONT_FAMILY_KEY)).ok_or_else(|| invalid(FONT_FAMILY_KEY))?;
        let weight = match fields.get(FONT_WEIGHT_KEY) {
            None => DEFAULT_FONT_WEIGHT,
            Some(Value::String(weight)) => weight.as_str(),
            Some(_) => return Err(invalid(FONT_WEIGHT_KEY)),
        };

        let extra: StyleMap = fields
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), URI_KEY | FONT_FAMILY_KEY | FONT_WEIGHT_KEY))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        trace!(face = logical_name, family, weight, "Descriptor accepted");

        Ok(FaceDescriptor::from_parts(
            logical_name.to_owned(),
            uri.to_owned(),
            family.to_owned(),
            self.platform.normalize_weight(weight).into_owned(),
            extra,
        ))
    }
}

/// Parses a raw registry authored as JSON text.
///
/// # Errors
/// Returns [`FaceError::Malformed`] when `text` is not a JSON object.
pub fn parse_raw_faces(text: &str) -> Result<RawFaces, FaceError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FaceError::Malformed {
            message: format!("expected an object of descriptors, found {}", kind_of(&other)).into(),
            context: None,
        }),
        Err(err) => Err(FaceError::Malformed { message: err.to_string().into(), context: None }),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

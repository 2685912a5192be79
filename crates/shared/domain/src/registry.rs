//! The logical-name keyed set of validated face descriptors.

use crate::face::{FONT_FAMILY_KEY, FONT_WEIGHT_KEY, FaceDescriptor, URI_KEY};
use serde::Serialize;
use std::collections::BTreeMap;

/// Unvalidated descriptor mapping as supplied by the application:
/// `logicalName -> { uri, fontFamily, fontWeight?, ...extra }`.
pub type RawFaces = serde_json::Map<String, serde_json::Value>;

/// An immutable mapping from logical font name to validated descriptor.
///
/// Registries are never edited in place; an update builds a new registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    faces: BTreeMap<String, FaceDescriptor>,
}

impl Registry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collects descriptors; a later descriptor with the same logical name
    /// replaces an earlier one wholesale.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = FaceDescriptor>) -> Self {
        let faces = descriptors.into_iter().map(|d| (d.logical_name().to_owned(), d)).collect();
        Self { faces }
    }

    #[must_use]
    pub fn get(&self, logical_name: &str) -> Option<&FaceDescriptor> {
        self.faces.get(logical_name)
    }

    #[must_use]
    pub fn contains(&self, logical_name: &str) -> bool {
        self.faces.contains_key(logical_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FaceDescriptor> {
        self.faces.values()
    }

    /// Renders the registry back into its raw declarative form.
    #[must_use]
    pub fn to_raw(&self) -> RawFaces {
        self.faces
            .iter()
            .map(|(name, face)| {
                let mut raw: RawFaces = face
                    .extra()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                raw.insert(URI_KEY.to_owned(), face.source_uri().into());
                raw.insert(FONT_FAMILY_KEY.to_owned(), face.font_family().into());
                raw.insert(FONT_WEIGHT_KEY.to_owned(), face.font_weight().into());
                (name.clone(), serde_json::Value::Object(raw))
            })
            .collect()
    }
}

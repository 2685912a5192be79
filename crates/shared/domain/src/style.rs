use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open mapping of style keys to values (`color`, `letterSpacing`, ...).
pub type StyleMap = BTreeMap<String, serde_json::Value>;

/// A declarative text style as handed to, or produced for, a rendering node.
///
/// `font_family`/`font_weight` are split out because they drive face lookup and
/// may be suppressed on platforms that assign typefaces imperatively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(flatten)]
    pub extra: StyleMap,
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The style without its font attributes.
    #[must_use]
    pub fn without_font(&self) -> Self {
        Self { font_family: None, font_weight: None, extra: self.extra.clone() }
    }

    /// Layers `top` over `self`; keys present in `top` win.
    #[must_use]
    pub fn merged(mut self, top: &Self) -> Self {
        if top.font_family.is_some() {
            self.font_family.clone_from(&top.font_family);
        }
        if top.font_weight.is_some() {
            self.font_weight.clone_from(&top.font_weight);
        }
        self.extra.extend(top.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// Style revealed while no custom face is bound to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackStyle {
    pub color: String,
    #[serde(alias = "fontfamily", alias = "font_family")]
    pub font_family: String,
    #[serde(alias = "fontweight", alias = "font_weight")]
    pub font_weight: String,
    #[serde(default, flatten)]
    pub extra: StyleMap,
}

impl FallbackStyle {
    #[must_use]
    pub fn to_style(&self) -> Style {
        let mut extra = self.extra.clone();
        extra.insert("color".to_owned(), serde_json::Value::String(self.color.clone()));
        Style {
            font_family: Some(self.font_family.clone()),
            font_weight: Some(self.font_weight.clone()),
            extra,
        }
    }
}

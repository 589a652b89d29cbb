//! The style document model and its structural validation.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TypeError};
use crate::layer::Layer;
use crate::metadata::Metadata;
use crate::reference::LATEST_VERSION;

/// Per-document identity fields. They describe where a single style came
/// from and are never carried into a merged style.
pub const PROVENANCE_FIELDS: [&str; 5] = ["created", "id", "modified", "owner", "draft"];

/// Top-level fields modelled by [`StyleDocument`] rather than kept in
/// [`StyleDocument::extra`].
pub const TYPED_FIELDS: [&str; 8] = [
    "version",
    "name",
    "metadata",
    "sources",
    "layers",
    "sprite",
    "glyphs",
    "visibility",
];

/// Who may see a style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// A parsed style document.
///
/// Fields the merge reasons about are typed; anything else at the top level
/// (`center`, `zoom`, `light`, provenance fields, ...) is kept in
/// [`StyleDocument::extra`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style specification version, kept as written. An explicit `null`
    /// stays `Some(Value::Null)`; only a missing key is `None`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Source definitions keyed by source id. Definitions are opaque.
    pub sources: Map<String, Value>,
    /// Layers in draw order.
    pub layers: Vec<Layer>,
    /// Sprite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Glyph URL template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Remaining top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::empty(LATEST_VERSION)
    }
}

impl StyleDocument {
    /// An unnamed style with the given version and no sources or layers.
    pub fn empty(version: u32) -> Self {
        Self {
            version: Some(Value::from(version)),
            name: None,
            metadata: None,
            sources: Map::new(),
            layers: Vec::new(),
            sprite: None,
            glyphs: None,
            visibility: None,
            extra: Map::new(),
        }
    }

    /// Parse and validate the document found at position `index` of a merge
    /// input.
    pub fn from_json(index: usize, value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TypeError::NotAnObject {
                index,
                found: json_kind(&value),
            });
        }
        let document: Self = serde_json::from_value(value).map_err(|e| TypeError::Malformed {
            index,
            reason: e.to_string(),
        })?;
        document.validate(index)?;
        Ok(document)
    }

    /// Check the invariants a merge relies on: non-empty, unique layer ids
    /// and layer sources that resolve within this document.
    pub fn validate(&self, index: usize) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.layers.len());
        for (position, layer) in self.layers.iter().enumerate() {
            if layer.id.is_empty() {
                return Err(TypeError::EmptyLayerId { index, position });
            }
            if !seen.insert(layer.id.as_str()) {
                return Err(TypeError::DuplicateLayerId {
                    index,
                    id: layer.id.clone(),
                });
            }
            if let Some(source) = &layer.source {
                if !self.sources.contains_key(source) {
                    return Err(TypeError::UnknownSource {
                        index,
                        layer: layer.id.clone(),
                        source_id: source.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if the declared version equals `expected`.
    ///
    /// Comparison is by numeric value: `8`, `8.0` and `"8"` all match 8.
    pub fn declares_version(&self, expected: u32) -> bool {
        let expected = f64::from(expected);
        match &self.version {
            Some(Value::Number(n)) => n.as_f64() == Some(expected),
            Some(Value::String(s)) => s.trim().parse::<f64>().is_ok_and(|v| v == expected),
            _ => false,
        }
    }

    /// Returns `true` if this style is marked private.
    pub fn is_private(&self) -> bool {
        self.visibility == Some(Visibility::Private)
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Short name of a JSON value's kind, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

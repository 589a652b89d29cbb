use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::metadata::GROUP_KEY;

/// A single rendering rule of a style.
///
/// Only the fields a merge rewires are typed. Paint, layout, filters and
/// everything else live in [`Layer::properties`] and round-trip untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer id, unique within its style.
    pub id: String,
    /// Id of the source the layer draws from. Background layers have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Layer metadata; carries the `mapbox:group` reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// All remaining layer fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Layer {
    /// Create a layer with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: None,
            metadata: None,
            properties: Map::new(),
        }
    }

    /// Builder: set the source id.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder: set the group reference.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.set_group(group);
        self
    }

    /// The group this layer belongs to, if its metadata names one.
    pub fn group(&self) -> Option<&str> {
        self.metadata.as_ref()?.get(GROUP_KEY)?.as_str()
    }

    /// Point the layer at a different group.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(GROUP_KEY.to_string(), Value::String(group.into()));
    }
}

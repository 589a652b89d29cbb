//! Style and layer metadata.
//!
//! Metadata is a free-form JSON object with one well-known key,
//! `mapbox:groups`, which maps group ids to group definitions. Layers point
//! into it through their own `mapbox:group` metadata entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding the group definitions of a style.
pub const GROUPS_KEY: &str = "mapbox:groups";

/// Layer metadata key naming the group a layer belongs to.
pub const GROUP_KEY: &str = "mapbox:group";

/// Style-level metadata with `mapbox:groups` split from the other keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Group definitions keyed by group id, if the style declares any.
    #[serde(rename = "mapbox:groups", default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Map<String, Value>>,
    /// Every other metadata key, in document order.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One metadata key, classified by how a merge treats it.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataEntry {
    /// The `mapbox:groups` map.
    Groups(Map<String, Value>),
    /// Any other key with its value.
    Other(String, Value),
}

impl Metadata {
    /// Returns `true` if neither groups nor other keys are present.
    pub fn is_empty(&self) -> bool {
        self.groups.is_none() && self.other.is_empty()
    }

    /// Group definitions, inserting an empty map if none exist yet.
    pub fn groups_mut(&mut self) -> &mut Map<String, Value> {
        self.groups.get_or_insert_with(Map::new)
    }

    /// Returns `true` if a group with this id is defined.
    pub fn has_group(&self, id: &str) -> bool {
        self.groups.as_ref().is_some_and(|groups| groups.contains_key(id))
    }
}

impl IntoIterator for Metadata {
    type Item = MetadataEntry;
    type IntoIter = std::vec::IntoIter<MetadataEntry>;

    /// Groups first (when present), then the remaining keys in order.
    fn into_iter(self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.other.len() + 1);
        if let Some(groups) = self.groups {
            entries.push(MetadataEntry::Groups(groups));
        }
        entries.extend(
            self.other
                .into_iter()
                .map(|(key, value)| MetadataEntry::Other(key, value)),
        );
        entries.into_iter()
    }
}

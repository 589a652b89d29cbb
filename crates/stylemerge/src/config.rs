use serde::{Deserialize, Serialize};
use stylemerge_types::{LATEST_VERSION, PROVENANCE_FIELDS, TYPED_FIELDS};

use crate::error::{MergeError, Result};

/// Configuration for a [`StyleMerger`](crate::StyleMerger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Version every input style must declare. Mismatches are errors.
    pub expected_version: u32,
    /// Placed between the names of merged styles.
    pub name_separator: String,
    /// Extra top-level fields to drop from merged styles, on top of
    /// [`PROVENANCE_FIELDS`] which are always dropped.
    ///
    /// Only untyped fields (`center`, `zoom`, ...) can be listed. Typed
    /// fields such as `name` or `sprite` are rejected by [`Self::validate`].
    pub strip_fields: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            expected_version: LATEST_VERSION,
            name_separator: " + ".into(),
            strip_fields: Vec::new(),
        }
    }
}

impl MergeConfig {
    /// Load a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).map_err(|e| MergeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject `strip_fields` entries that name a typed style field.
    pub fn validate(&self) -> Result<()> {
        match self
            .strip_fields
            .iter()
            .find(|f| TYPED_FIELDS.contains(&f.as_str()))
        {
            Some(field) => Err(MergeError::Config(format!(
                "strip_fields cannot name the typed field \"{field}\""
            ))),
            None => Ok(()),
        }
    }

    /// Returns `true` if `field` is stripped from merged styles.
    pub fn strips(&self, field: &str) -> bool {
        PROVENANCE_FIELDS.contains(&field) || self.strip_fields.iter().any(|f| f == field)
    }
}

//! The merge fold.
//!
//! Documents are absorbed one at a time into an accumulator style. Each step
//! works on owned copies, so callers' documents are never modified. Rename
//! tables for sources and groups live only for the document being absorbed.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stylemerge_types::document::json_kind;
use stylemerge_types::{
    Diagnostic, Diagnostics, Layer, Metadata, MetadataEntry, Severity, StyleDocument, Visibility,
};
use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::equality::{deep_equal, shallow_equal};
use crate::error::{MergeError, Result};
use crate::keys::next_new_key;

/// Rendering of an absent value in diagnostic messages.
const MISSING: &str = "undefined";

const NO_STYLES: &str = "No styles provided, populating with an empty style instead.";

/// The merged style together with everything the merge had to report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Errors, or `None` when there were none.
    pub errors: Option<Vec<Diagnostic>>,
    /// Warnings, or `None` when there were none.
    pub warnings: Option<Vec<Diagnostic>>,
    /// The merged style. Always present, even when errors were recorded.
    pub style: StyleDocument,
}

impl MergeResult {
    /// Returns `true` if any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Returns `true` if neither errors nor warnings were recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_none() && self.warnings.is_none()
    }

    /// Split into `(errors, warnings, style)`.
    pub fn into_parts(self) -> (Option<Vec<Diagnostic>>, Option<Vec<Diagnostic>>, StyleDocument) {
        (self.errors, self.warnings, self.style)
    }
}

/// Merges ordered lists of style documents.
///
/// Earlier documents draw on top: their layers come first in the result and
/// their names, metadata values and top-level fields take precedence. Sprite
/// and glyph URLs are the exception and follow the last document.
#[derive(Clone, Debug, Default)]
pub struct StyleMerger {
    config: MergeConfig,
}

impl StyleMerger {
    /// Create a merger with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge owned documents.
    ///
    /// Every document is validated before anything is folded; a structural
    /// problem fails the whole call. Conflicts between valid documents are
    /// reported on the returned [`MergeResult`].
    pub fn merge(&self, styles: Vec<StyleDocument>) -> Result<MergeResult> {
        for (index, style) in styles.iter().enumerate() {
            style.validate(index)?;
        }

        let mut fold = Fold::new(&self.config);
        if styles.is_empty() {
            fold.report(Severity::Warning, None, NO_STYLES);
        }
        for (index, style) in styles.into_iter().enumerate() {
            fold.absorb(index, style);
        }
        Ok(fold.finish())
    }

    /// Merge borrowed documents by cloning them first.
    pub fn merge_borrowed(&self, styles: &[StyleDocument]) -> Result<MergeResult> {
        self.merge(styles.to_vec())
    }

    /// Parse a raw JSON array of styles and merge it.
    pub fn merge_values(&self, styles: &Value) -> Result<MergeResult> {
        let Value::Array(items) = styles else {
            return Err(MergeError::NotAnArray {
                found: json_kind(styles),
            });
        };
        let documents = items
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, value)| StyleDocument::from_json(index, value))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.merge(documents)
    }

    /// Merge and hand `(errors, warnings, style)` to `callback`.
    ///
    /// The callback runs exactly once, before this returns, unless validation
    /// fails, in which case it does not run at all.
    pub fn merge_with<F>(&self, styles: Vec<StyleDocument>, callback: F) -> Result<()>
    where
        F: FnOnce(Option<Vec<Diagnostic>>, Option<Vec<Diagnostic>>, StyleDocument),
    {
        let (errors, warnings, style) = self.merge(styles)?.into_parts();
        callback(errors, warnings, style);
        Ok(())
    }
}

/// Merge with the default configuration and report through `callback`.
pub fn merge<F>(styles: Vec<StyleDocument>, callback: F) -> Result<()>
where
    F: FnOnce(Option<Vec<Diagnostic>>, Option<Vec<Diagnostic>>, StyleDocument),
{
    StyleMerger::default().merge_with(styles, callback)
}

/// Accumulator threaded through the documents of one merge call.
struct Fold<'a> {
    config: &'a MergeConfig,
    style: StyleDocument,
    diagnostics: Diagnostics,
    layer_ids: HashSet<String>,
}

impl<'a> Fold<'a> {
    fn new(config: &'a MergeConfig) -> Self {
        Self {
            config,
            style: StyleDocument::empty(config.expected_version),
            diagnostics: Diagnostics::new(),
            layer_ids: HashSet::new(),
        }
    }

    fn report(&mut self, severity: Severity, index: Option<usize>, message: impl Into<String>) {
        let diagnostic = match index {
            Some(index) => Diagnostic::at(index, message),
            None => Diagnostic::global(message),
        };
        warn!(%severity, index = ?diagnostic.index, "{}", diagnostic.message);
        self.diagnostics.push(severity, diagnostic);
    }

    fn absorb(&mut self, index: usize, style: StyleDocument) {
        self.check_version(index, &style);
        let StyleDocument {
            version: _,
            name,
            metadata,
            sources,
            layers,
            sprite,
            glyphs,
            visibility,
            extra,
        } = style;

        self.merge_name(name);
        let group_renames = self.merge_metadata(index, metadata);
        let source_renames = self.merge_sources(index, sources);
        let renamed_layers = self.merge_layers(layers, &source_renames, &group_renames);
        self.merge_sprite(index, sprite);
        self.merge_glyphs(index, glyphs);
        self.merge_visibility(visibility);
        self.merge_extra(extra);

        debug!(
            index,
            renamed_sources = source_renames.len(),
            renamed_groups = group_renames.len(),
            renamed_layers,
            "absorbed style"
        );
    }

    fn check_version(&mut self, index: usize, style: &StyleDocument) {
        let expected = self.config.expected_version;
        if !style.declares_version(expected) {
            let found = style.version.as_ref().map_or_else(|| MISSING.to_string(), render);
            self.report(
                Severity::Error,
                Some(index),
                format!("Style version must be latest. Found {found}, required {expected}"),
            );
        }
    }

    fn merge_name(&mut self, name: Option<String>) {
        let Some(name) = name else { return };
        self.style.name = Some(match self.style.name.take() {
            Some(current) => format!("{current}{}{name}", self.config.name_separator),
            None => name,
        });
    }

    /// Returns the group ids renamed while absorbing this document.
    fn merge_metadata(&mut self, index: usize, metadata: Option<Metadata>) -> HashMap<String, String> {
        let mut renames = HashMap::new();
        let Some(incoming) = metadata else {
            return renames;
        };

        let mut findings = Vec::new();
        let merged = self.style.metadata.get_or_insert_with(Metadata::default);
        for entry in incoming {
            match entry {
                MetadataEntry::Groups(groups) => {
                    let target = merged.groups_mut();
                    for (id, group) in groups {
                        let new_id = if target.contains_key(&id) {
                            let renamed = next_new_key(&id, |k| target.contains_key(k));
                            findings.push(format!(
                                "Detected duplicate mapbox:groups id \"{id}\", renaming as \"{renamed}\" to avoid conflicts."
                            ));
                            renames.insert(id, renamed.clone());
                            renamed
                        } else {
                            id
                        };
                        target.insert(new_id, group);
                    }
                }
                MetadataEntry::Other(key, value) => match merged.other.get(&key) {
                    None => {
                        merged.other.insert(key, value);
                    }
                    Some(current) if shallow_equal(current, &value) => {}
                    Some(current) => {
                        let current = render(current);
                        findings.push(format!(
                            "metadata.{key} has conflicting values (\"{current}\",\"{}\"), using \"{current}\".",
                            render(&value)
                        ));
                    }
                },
            }
        }

        for message in findings {
            self.report(Severity::Warning, Some(index), message);
        }
        renames
    }

    /// Returns the source ids renamed while absorbing this document.
    fn merge_sources(&mut self, index: usize, sources: Map<String, Value>) -> HashMap<String, String> {
        let mut renames = HashMap::new();
        for (id, definition) in sources {
            let renamed = match self.style.sources.get(&id) {
                None => None,
                Some(existing) if deep_equal(existing, &definition) => continue,
                Some(_) => Some(next_new_key(&id, |k| self.style.sources.contains_key(k))),
            };
            match renamed {
                None => {
                    self.style.sources.insert(id, definition);
                }
                Some(new_id) => {
                    self.report(
                        Severity::Warning,
                        Some(index),
                        format!(
                            "Detected duplicate source id \"{id}\", renaming as \"{new_id}\" to avoid conflicts."
                        ),
                    );
                    self.style.sources.insert(new_id.clone(), definition);
                    renames.insert(id, new_id);
                }
            }
        }
        renames
    }

    /// Appends the layers and returns how many needed a new id.
    fn merge_layers(
        &mut self,
        layers: Vec<Layer>,
        source_renames: &HashMap<String, String>,
        group_renames: &HashMap<String, String>,
    ) -> usize {
        let mut renamed = 0;
        for mut layer in layers {
            if let Some(new_source) = layer.source.as_ref().and_then(|s| source_renames.get(s)) {
                layer.source = Some(new_source.clone());
            }
            if self.layer_ids.contains(&layer.id) {
                layer.id = next_new_key(&layer.id, |k| self.layer_ids.contains(k));
                renamed += 1;
            }
            if let Some(new_group) = layer.group().and_then(|g| group_renames.get(g)) {
                let new_group = new_group.clone();
                layer.set_group(new_group);
            }
            self.layer_ids.insert(layer.id.clone());
            self.style.layers.push(layer);
        }
        renamed
    }

    fn merge_sprite(&mut self, index: usize, sprite: Option<String>) {
        if let Some(message) = conflict(self.style.sprite.as_deref(), sprite.as_deref())
            .map(|(current, incoming)| format!("Sprite can't be merged. Found {current} and {incoming}"))
        {
            self.report(Severity::Warning, Some(index), message);
        }
        self.style.sprite = sprite;
    }

    fn merge_glyphs(&mut self, index: usize, glyphs: Option<String>) {
        if let Some(message) = conflict(self.style.glyphs.as_deref(), glyphs.as_deref()).map(
            |(current, incoming)| format!("Glyphs can't be merged. Found \"{current}\" and \"{incoming}\""),
        ) {
            self.report(Severity::Error, Some(index), message);
        }
        self.style.glyphs = glyphs;
    }

    fn merge_visibility(&mut self, visibility: Option<Visibility>) {
        self.style.visibility = match (self.style.visibility, visibility) {
            (Some(Visibility::Private), _) | (_, Some(Visibility::Private)) => {
                Some(Visibility::Private)
            }
            (Some(current), _) => Some(current),
            (None, incoming) => incoming,
        };
    }

    /// First-seen wins for untyped top-level fields. Later values are dropped
    /// silently: camera fields differ between almost any two styles.
    fn merge_extra(&mut self, extra: Map<String, Value>) {
        for (key, value) in extra {
            if self.config.strips(&key) || self.style.extra.contains_key(&key) {
                continue;
            }
            self.style.extra.insert(key, value);
        }
    }

    fn finish(self) -> MergeResult {
        let Self {
            config,
            mut style,
            diagnostics,
            ..
        } = self;
        style.extra.retain(|key, _| !config.strips(key));

        info!(
            layers = style.layers.len(),
            sources = style.sources.len(),
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            "style merge finished"
        );
        let (errors, warnings) = diagnostics.into_parts();
        MergeResult {
            errors,
            warnings,
            style,
        }
    }
}

/// A set, non-empty current URL that the incoming one does not repeat.
/// An absent incoming URL counts as different.
fn conflict(current: Option<&str>, incoming: Option<&str>) -> Option<(String, String)> {
    let current = current.filter(|c| !c.is_empty())?;
    if Some(current) == incoming {
        return None;
    }
    Some((current.to_string(), incoming.unwrap_or(MISSING).to_string()))
}

/// Text form of a value inside a diagnostic: strings bare, everything else as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

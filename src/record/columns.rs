//! Column-to-label renaming for attribute and top-level fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How one source field is shown on a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRule {
    /// Label to print instead of the raw field name.
    pub display_name: Option<String>,
    /// Never show this field.
    pub ignore: bool,
}

/// Original field name → [`ColumnRule`].
///
/// Attributes are shown unless a rule ignores them. Top-level fields are a
/// whitelist: only fields with a non-ignored rule are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<String, ColumnRule>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename a field.
    pub fn rename(mut self, field: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.0.insert(
            field.into(),
            ColumnRule {
                display_name: Some(display_name.into()),
                ignore: false,
            },
        );
        self
    }

    /// Show a field under its own name.
    pub fn show(mut self, field: impl Into<String>) -> Self {
        self.0.insert(field.into(), ColumnRule::default());
        self
    }

    /// Hide a field.
    pub fn ignore(mut self, field: impl Into<String>) -> Self {
        self.0.insert(
            field.into(),
            ColumnRule {
                display_name: None,
                ignore: true,
            },
        );
        self
    }

    pub fn rule(&self, field: &str) -> Option<&ColumnRule> {
        self.0.get(field.trim())
    }

    /// Label for an attribute, or `None` when ignored.
    pub fn attribute_label<'a>(&'a self, field: &'a str) -> Option<&'a str> {
        match self.rule(field) {
            Some(rule) if rule.ignore => None,
            Some(rule) => Some(rule.display_name.as_deref().unwrap_or(field)),
            None => Some(field),
        }
    }

    /// Label for a top-level field, or `None` when not whitelisted.
    pub fn field_label<'a>(&'a self, field: &'a str) -> Option<&'a str> {
        match self.rule(field) {
            Some(rule) if !rule.ignore => Some(rule.display_name.as_deref().unwrap_or(field)),
            _ => None,
        }
    }

    /// Merge another mapping over this one.
    pub fn extend(&mut self, other: ColumnMapping) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

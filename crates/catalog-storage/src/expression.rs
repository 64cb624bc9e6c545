//! Partial update expressions.
//!
//! An [`UpdateExpression`] is a list of SET actions. Each action names its
//! target attribute either directly or through a `#alias`, and its value
//! through a `:placeholder`. Aliases and placeholders are resolved against
//! the expression's own attribute-name and attribute-value tables.
//!
//! Reserved words may not be used as direct attribute names; callers alias
//! them instead (`#name = :name`).

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error::StorageError;
use crate::types::{Item, KEY_ATTRIBUTE};

/// Words the expression language refuses as bare attribute names.
const RESERVED_WORDS: &[&str] = &[
    "and", "attribute", "between", "by", "count", "data", "date", "delete", "desc", "exists",
    "from", "in", "index", "key", "limit", "name", "not", "null", "or", "order", "remove",
    "select", "set", "size", "status", "table", "timestamp", "type", "update", "user", "value",
    "values", "where",
];

/// Returns true if `word` must be aliased in an update expression.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// Left-hand side of a SET action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Attribute(String),
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SetAction {
    target: Target,
    placeholder: String,
}

/// A SET-only update expression with its name and value tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    actions: Vec<SetAction>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `attribute = placeholder`, binding `value` to the placeholder.
    pub fn set(
        mut self,
        attribute: impl Into<String>,
        placeholder: impl Into<String>,
        value: Value,
    ) -> Self {
        let placeholder = placeholder.into();
        self.values.insert(placeholder.clone(), value);
        self.actions.push(SetAction {
            target: Target::Attribute(attribute.into()),
            placeholder,
        });
        self
    }

    /// Adds `alias = placeholder`, where `alias` stands for `attribute`.
    pub fn set_aliased(
        mut self,
        alias: impl Into<String>,
        attribute: impl Into<String>,
        placeholder: impl Into<String>,
        value: Value,
    ) -> Self {
        let alias = alias.into();
        let placeholder = placeholder.into();
        self.names.insert(alias.clone(), attribute.into());
        self.values.insert(placeholder.clone(), value);
        self.actions.push(SetAction {
            target: Target::Alias(alias),
            placeholder,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The `#alias -> attribute` table.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// The `:placeholder -> value` table.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Textual form, e.g. `SET #name = :name, price = :price`.
    pub fn render(&self) -> String {
        let clauses: Vec<String> = self
            .actions
            .iter()
            .map(|action| {
                let lhs = match &action.target {
                    Target::Attribute(name) | Target::Alias(name) => name.as_str(),
                };
                format!("{} = {}", lhs, action.placeholder)
            })
            .collect();
        format!("SET {}", clauses.join(", "))
    }

    /// Resolves every alias and placeholder, checking the expression is
    /// well formed. Backends resolve before touching stored state so a bad
    /// expression never leaves a partial record behind.
    pub fn resolve(&self) -> Result<ResolvedUpdate, StorageError> {
        if self.actions.is_empty() {
            return Err(StorageError::validation(
                "update expression has no SET actions",
            ));
        }

        let mut used_names = BTreeSet::new();
        let mut used_values = BTreeSet::new();
        let mut targets = BTreeSet::new();
        let mut assignments = Vec::with_capacity(self.actions.len());

        for action in &self.actions {
            let attribute = match &action.target {
                Target::Attribute(name) => {
                    if name.is_empty() || name.starts_with('#') || name.starts_with(':') {
                        return Err(StorageError::validation(format!(
                            "invalid attribute name '{name}'"
                        )));
                    }
                    if is_reserved_word(name) {
                        return Err(StorageError::validation(format!(
                            "attribute name is a reserved keyword: {name}"
                        )));
                    }
                    name.clone()
                }
                Target::Alias(alias) => {
                    if !alias.starts_with('#') {
                        return Err(StorageError::validation(format!(
                            "attribute name alias must start with '#': {alias}"
                        )));
                    }
                    let resolved = self.names.get(alias).ok_or_else(|| {
                        StorageError::validation(format!(
                            "unresolved attribute name alias: {alias}"
                        ))
                    })?;
                    used_names.insert(alias.as_str());
                    resolved.clone()
                }
            };

            if attribute == KEY_ATTRIBUTE {
                return Err(StorageError::validation(format!(
                    "cannot update key attribute '{KEY_ATTRIBUTE}'"
                )));
            }
            if !targets.insert(attribute.clone()) {
                return Err(StorageError::validation(format!(
                    "attribute '{attribute}' is set more than once"
                )));
            }

            if !action.placeholder.starts_with(':') {
                return Err(StorageError::validation(format!(
                    "value placeholder must start with ':': {}",
                    action.placeholder
                )));
            }
            let value = self.values.get(&action.placeholder).ok_or_else(|| {
                StorageError::validation(format!(
                    "unresolved value placeholder: {}",
                    action.placeholder
                ))
            })?;
            used_values.insert(action.placeholder.as_str());

            assignments.push((attribute, value.clone()));
        }

        if let Some(unused) = self.names.keys().find(|k| !used_names.contains(k.as_str())) {
            return Err(StorageError::validation(format!(
                "attribute name alias supplied but unused: {unused}"
            )));
        }
        if let Some(unused) = self.values.keys().find(|k| !used_values.contains(k.as_str())) {
            return Err(StorageError::validation(format!(
                "value placeholder supplied but unused: {unused}"
            )));
        }

        Ok(ResolvedUpdate { assignments })
    }
}

/// A validated update: concrete attribute names paired with values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUpdate {
    assignments: Vec<(String, Value)>,
}

impl ResolvedUpdate {
    /// Writes every assignment into `item`. Attributes not named are kept.
    pub fn apply(&self, item: &mut Item) {
        for (attribute, value) in &self.assignments {
            item.insert(attribute.clone(), value.clone());
        }
    }
}

//! Resolved numeric inputs for an axis formula

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named numeric inputs resolved from validated evidence
///
/// Absent keys are data gaps; they are never filled with zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiInputs(BTreeMap<String, f64>);

impl KpiInputs {
    /// Create an empty input set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Whether a value is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of resolved inputs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no input is resolved
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over inputs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for KpiInputs {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

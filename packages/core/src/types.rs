// ABOUTME: Question and tag type definitions
// ABOUTME: TagSet/TagValues keep tag names unique and values duplicate-free by construction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store-assigned question identifier
pub type QuestionId = i64;

/// Insertion-ordered list of distinct values attached to one tag name.
///
/// Values can only be added through [`TagSet::insert`], which skips duplicates,
/// so a `TagValues` never holds the same value twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagValues(Vec<String>);

impl TagValues {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    fn push_unique(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    fn remove(&mut self, value: &str) -> bool {
        match self.0.iter().position(|v| v == value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<String>> for TagValues {
    fn from(values: Vec<String>) -> Self {
        let mut tag_values = TagValues::default();
        for value in &values {
            tag_values.push_unique(value);
        }
        tag_values
    }
}

impl From<TagValues> for Vec<String> {
    fn from(values: TagValues) -> Self {
        values.0
    }
}

/// Tags owned by a single question: tag name -> distinct values.
///
/// A tag entry exists only while it has at least one value; removing the last
/// value removes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct TagSet(BTreeMap<String, TagValues>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TagValues> {
        self.0.get(name)
    }

    pub fn contains_tag(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.0.get(name).is_some_and(|values| values.contains(value))
    }

    /// Add `value` under `name`, creating the tag if needed.
    /// Returns false when the pair was already present.
    pub fn insert(&mut self, name: &str, value: &str) -> bool {
        if let Some(values) = self.0.get_mut(name) {
            return values.push_unique(value);
        }

        let mut values = TagValues::default();
        values.push_unique(value);
        self.0.insert(name.to_string(), values);
        true
    }

    /// Remove `value` from `name`, dropping the tag once it has no values left.
    /// Returns false when the pair was not present.
    pub fn remove(&mut self, name: &str, value: &str) -> bool {
        let Some(values) = self.0.get_mut(name) else {
            return false;
        };

        let removed = values.remove(value);
        if values.is_empty() {
            self.0.remove(name);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValues)> {
        self.0.iter().map(|(name, values)| (name.as_str(), values))
    }
}

impl From<BTreeMap<String, Vec<String>>> for TagSet {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        let mut tags = TagSet::new();
        for (name, values) in &map {
            for value in values {
                tags.insert(name, value);
            }
        }
        tags
    }
}

impl From<TagSet> for BTreeMap<String, Vec<String>> {
    fn from(tags: TagSet) -> Self {
        tags.0
            .into_iter()
            .map(|(name, values)| (name, values.into()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub tags: TagSet,
    /// Bumped on every tag mutation; used for optimistic concurrency
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a question
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCreateInput {
    pub question: String,
    pub answer: String,
    pub tags: TagSet,
}

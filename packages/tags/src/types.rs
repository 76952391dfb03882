// ABOUTME: Tag engine input and outcome types
// ABOUTME: Validated tag changes, tag queries, and link/withdraw results

use kb_core::{normalize_tag_name, normalize_tag_value, TagSet};

use crate::error::TagError;

/// A validated request to add or remove values under one tag name.
///
/// Names and values are trimmed. `values` keeps the caller's order and
/// duplicates so outcomes can report how many inputs were ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChange {
    name: String,
    values: Vec<String>,
}

impl TagChange {
    pub fn new<S: AsRef<str>>(name: &str, values: &[S]) -> Result<Self, TagError> {
        let name = normalize_tag_name(name)?;

        if values.is_empty() {
            return Err(TagError::InvalidTag(format!(
                "Tag '{}' requires at least one value",
                name
            )));
        }

        let values = values
            .iter()
            .map(|value| normalize_tag_value(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Result of linking values to a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub tag_name: String,
    /// All values of the tag after linking
    pub values: Vec<String>,
    pub added: usize,
    /// Inputs that were duplicates, either within the request or already linked
    pub ignored: usize,
}

/// Result of withdrawing values from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawOutcome {
    pub tag_name: String,
    /// Values left on the tag; empty when the tag was removed
    pub remaining: Vec<String>,
    pub removed: usize,
    pub tag_removed: bool,
}

/// Filter selecting questions by one tag name and any of a set of values.
/// An empty value list matches every question carrying the tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    name: String,
    values: Vec<String>,
}

impl TagQuery {
    pub fn new<S: AsRef<str>>(name: &str, values: &[S]) -> Result<Self, TagError> {
        let name = normalize_tag_name(name)?;

        let mut normalized: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let value = normalize_tag_value(value.as_ref())?;
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }

        Ok(Self {
            name,
            values: normalized,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn matches_any_value(&self) -> bool {
        self.values.is_empty()
    }

    pub fn matches(&self, tags: &TagSet) -> bool {
        match tags.get(&self.name) {
            Some(_) if self.matches_any_value() => true,
            Some(linked) => self.values.iter().any(|value| linked.contains(value)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_change_trims_name_and_values() {
        let change = TagChange::new(" color ", &[" red", "blue "]).unwrap();
        assert_eq!(change.name(), "color");
        assert_eq!(change.values(), ["red", "blue"]);
    }

    #[rstest]
    #[case("", &["red"])]
    #[case("   ", &["red"])]
    #[case("color", &[])]
    #[case("color", &["red", " "])]
    fn test_invalid_change(#[case] name: &str, #[case] values: &[&str]) {
        let result = TagChange::new(name, values);
        assert!(matches!(result, Err(TagError::InvalidTag(_))));
    }

    #[test]
    fn test_query_dedupes_values() {
        let query = TagQuery::new("color", &["red", "red", " blue"]).unwrap();
        assert_eq!(query.values(), ["red", "blue"]);
    }

    #[test]
    fn test_query_matches() {
        let mut tags = TagSet::new();
        tags.insert("color", "red");

        assert!(TagQuery::new::<&str>("color", &[]).unwrap().matches(&tags));
        assert!(TagQuery::new("color", &["blue", "red"]).unwrap().matches(&tags));
        assert!(!TagQuery::new("color", &["blue"]).unwrap().matches(&tags));
        assert!(!TagQuery::new::<&str>("Color", &[]).unwrap().matches(&tags));
    }
}

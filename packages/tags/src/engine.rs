// ABOUTME: Link and withdraw operations on a question's TagSet
// ABOUTME: Idempotent union on link, pruning of emptied tags on withdraw

use kb_core::TagSet;
use tracing::debug;

use crate::error::TagError;
use crate::types::{LinkOutcome, TagChange, WithdrawOutcome};

/// Link every value of `change` to its tag, creating the tag if needed.
///
/// Values already linked and duplicates inside the request are skipped.
pub fn link_values(tags: &mut TagSet, change: &TagChange) -> LinkOutcome {
    let name = change.name();

    let added = change
        .values()
        .iter()
        .filter(|value| tags.insert(name, value))
        .count();
    let ignored = change.values().len() - added;

    debug!("Linked tag '{}': {} added, {} ignored", name, added, ignored);

    LinkOutcome {
        tag_name: name.to_string(),
        values: tags.get(name).map(|v| v.to_vec()).unwrap_or_default(),
        added,
        ignored,
    }
}

/// Withdraw every value of `change` from its tag.
///
/// Values that are not linked are ignored, but the tag itself must exist.
/// When the last value goes, the tag goes with it.
pub fn withdraw_values(
    tags: &mut TagSet,
    change: &TagChange,
) -> Result<WithdrawOutcome, TagError> {
    let name = change.name();

    if !tags.contains_tag(name) {
        return Err(TagError::TagNotFound(name.to_string()));
    }

    let removed = change
        .values()
        .iter()
        .filter(|value| tags.remove(name, value))
        .count();

    let remaining = tags.get(name).map(|v| v.to_vec()).unwrap_or_default();
    let tag_removed = remaining.is_empty();

    debug!("Withdrew from tag '{}': {} removed, tag removed: {}", name, removed, tag_removed);

    Ok(WithdrawOutcome {
        tag_name: name.to_string(),
        remaining,
        removed,
        tag_removed,
    })
}

/// Build a fresh TagSet from a name -> values mapping using link semantics.
/// Nothing is returned unless every entry is valid.
pub fn build_tag_set<I, S>(entries: I) -> Result<TagSet, TagError>
where
    I: IntoIterator<Item = (S, Vec<String>)>,
    S: AsRef<str>,
{
    let mut tags = TagSet::new();
    for (name, values) in entries {
        let change = TagChange::new(name.as_ref(), values.as_slice())?;
        link_values(&mut tags, &change);
    }
    Ok(tags)
}

// ABOUTME: Tag association engine for knowledge base questions
// ABOUTME: Pure logic for linking, withdrawing and matching tag values on a TagSet

pub mod engine;
pub mod error;
pub mod types;

// Re-export main types
pub use engine::{build_tag_set, link_values, withdraw_values};
pub use error::TagError;
pub use types::{LinkOutcome, TagChange, TagQuery, WithdrawOutcome};

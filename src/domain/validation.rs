//! Client-input checks applied before a strict (reject-duplicates) create.

use crate::domain::person::{Person, PersonDraft};

pub const MISSING_FIELDS: &str = "name and number is required";
pub const NAME_NOT_UNIQUE: &str = "name must be unique";

/// Fails with `MISSING_FIELDS` when either field is absent or blank.
pub fn require_fields(draft: &PersonDraft) -> Result<(), &'static str> {
    if draft.name().trim().is_empty() || draft.number().trim().is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(())
}

/// Case-insensitive name comparison used for the uniqueness rule.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Fails with `NAME_NOT_UNIQUE` when `existing` already holds the draft's name.
pub fn require_unique_name(draft: &PersonDraft, existing: &[Person]) -> Result<(), &'static str> {
    if existing.iter().any(|p| same_name(&p.name, draft.name())) {
        return Err(NAME_NOT_UNIQUE);
    }
    Ok(())
}

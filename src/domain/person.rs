//! The `Person` record and the payloads used to create or replace one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Store-assigned identifier.
///
/// The in-memory store hands out sequential integers, the Postgres store hands out UUIDs.
/// Both serialize as their natural JSON form (number vs string).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonId {
    Seq(u64),
    Uuid(Uuid),
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonId::Seq(n) => write!(f, "{}", n),
            PersonId::Uuid(u) => write!(f, "{}", u),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    /// Integer (in-memory store) or UUID string (Postgres store).
    #[schema(value_type = String, example = "1")]
    pub id: PersonId,
    pub name: String,
    pub number: String,
    /// Creation timestamp, set server-side.
    #[schema(value_type = String, format = DateTime)]
    pub date: DateTime<Utc>,
}

/// Client-supplied fields of a person, before the store assigns an id and a date.
///
/// Both fields are optional at the wire level so that a missing field becomes a
/// validation failure instead of a JSON rejection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn number(&self) -> &str {
        self.number.as_deref().unwrap_or("")
    }

    /// Returns a copy with the name lower-cased (the upsert key form).
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.as_ref().map(|n| n.to_lowercase()),
            number: self.number.clone(),
        }
    }

    /// Store-level schema check, run by every store on create and update.
    ///
    /// Returns the validation message in the `Person validation failed: ...` form.
    pub fn check_schema(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.name().trim().is_empty() {
            missing.push("name: Path `name` is required.");
        }
        if self.number().trim().is_empty() {
            missing.push("number: Path `number` is required.");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Person validation failed: {}", missing.join(", ")))
        }
    }

    /// Builds a full record from a draft that already passed `check_schema`.
    pub fn into_person(self, id: PersonId, date: DateTime<Utc>) -> Person {
        Person {
            id,
            name: self.name.unwrap_or_default(),
            number: self.number.unwrap_or_default(),
            date,
        }
    }
}

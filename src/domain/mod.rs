//! Phonebook domain: the person record and its validation rules.

pub mod person;
pub mod validation;

pub use person::{Person, PersonDraft, PersonId};

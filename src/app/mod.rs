pub mod phonebook_service;

pub use phonebook_service::{PhonebookError, PhonebookInfo, PhonebookResult, PhonebookService};

//! Storage abstractions for the service layer
//!
//! Holds the whole-document JSON store that gives every caller exclusive
//! load-mutate-save access to one persisted file.

pub mod json_doc_store;

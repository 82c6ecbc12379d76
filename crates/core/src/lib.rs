//! Domain types, errors, and pure rules for the StudyTrack backend.
//!
//! Nothing in this crate touches the database; repositories and handlers
//! call into it for validation, checklist derivation, and aggregation.

pub mod checklist;
pub mod error;
pub mod stats;
pub mod study;
pub mod types;

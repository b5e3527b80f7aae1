//! # Semact Core
//!
//! Shared data model for the semact engine: datasets of flat records,
//! CRUD intents, and proposed action candidates.
//!
//! A dataset is a mapping from collection name to an ordered list of flat
//! records. There is no declared schema: records are plain JSON objects,
//! and any relational structure between collections is inferred by the
//! engine, never stored here.

pub mod action;
pub mod dataset;

pub use action::{ActionCandidate, Intent, Provenance};
pub use dataset::{field_names, scalar_text, Dataset, Record};

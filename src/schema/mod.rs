//! # Schema Module
//!
//! The schema capability: a JSON Schema compiled for validation, paired with a
//! side-channel of documentation metadata (component name, description,
//! example values).
//!
//! Validation and metadata are strictly decoupled. Attaching an example or a
//! description never changes what the schema accepts, and the validator never
//! reads the metadata. The same [`Schema`] value is handed both to the
//! validation pipeline and to the document synthesizer, so the enforced schema
//! and the documented schema cannot drift apart.

mod core;

pub use core::{Schema, SchemaMeta, Violation};

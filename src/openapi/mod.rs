//! # OpenAPI Module
//!
//! The document synthesizer: walks the registry in registration order and
//! renders every route's inputs, outputs and example values into an
//! OpenAPI-3.0-shaped JSON document.
//!
//! The schemas reified into the document are the exact [`Schema`] values the
//! validation pipeline enforces; synthesis never defines a parallel schema
//! that could drift from the enforced one. Given the same registry the output
//! is byte-identical: paths follow registration order, each operation emits
//! parameters, then request body, then responses by ascending status code,
//! and `serde_json` preserves insertion order.
//!
//! Because the registry is immutable once built, the synthesized document can
//! be cached for the process lifetime; [`ApiDoc`] binds a registry at
//! construction and does exactly that.
//!
//! [`Schema`]: crate::schema::Schema

mod core;

pub use core::{synthesize, ApiDoc, ApiInfo};

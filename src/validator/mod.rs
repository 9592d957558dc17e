//! # Validator Module
//!
//! The request-validation pipeline. Given a matched route descriptor and the
//! raw request inputs, it runs each declared schema binding and yields either
//! a fully validated input bundle or the complete list of failures.
//!
//! Locations are visited in a fixed order (path, query, header, body) so
//! path-parameter errors surface before body errors. The pipeline never
//! short-circuits: every failing location contributes its errors, each tagged
//! with its source location, so a caller sees all validation problems at once.
//!
//! Validation failures are values, never faults. The pipeline returns
//! [`Validation::Invalid`]; converting that into a 400-class response is the
//! dispatcher's job.

mod core;

pub use core::{validate_request, FieldError, RawRequest, ValidInput, Validation};

//! # Registry Module
//!
//! The route-definition data model: an immutable [`RouteDescriptor`] couples
//! an HTTP method and a `{name}` path template with per-location input
//! schemas and per-status output schemas, and the [`Registry`] holds the
//! ordered, duplicate-free collection of descriptors.
//!
//! ## Lifecycle
//!
//! A [`RegistryBuilder`] is the single writer: descriptors are registered at
//! startup, invariants are enforced at `register` time, and `build()` freezes
//! the registry. After that the registry is read-only, so concurrent requests
//! and document synthesis read it without locking, and changing routes means
//! building a fresh registry.
//!
//! ## Matching
//!
//! [`Registry::find`] decomposes templates and request paths into segments: a
//! path matches a template iff the segment counts are equal and every literal
//! segment matches exactly. When several templates structurally match, the
//! first one registered wins.

mod core;
mod descriptor;

pub use core::{Registry, RegistryBuilder, RouteMatch, MAX_INLINE_PARAMS, ParamVec};
pub use descriptor::{DescriptorError, InputBindings, Location, ResponseSpec, RouteDescriptor};

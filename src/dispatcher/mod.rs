//! # Dispatcher Module
//!
//! Handler dispatch for validated requests.
//!
//! ## Overview
//!
//! The dispatcher owns the mapping from handler names to handler functions.
//! After the validation pipeline produces a `Valid` bundle, the dispatcher:
//! - Looks up the handler by the descriptor's handler name
//! - Invokes it exactly once with the validated [`HandlerRequest`]
//! - Catches handler panics and converts them into 500 responses
//!
//! Handlers return a status code and JSON body. The status must be one of
//! the route's declared outputs; that conformance is a documentation
//! contract, enforced at request time only when the service runs in strict
//! output-checking mode.
//!
//! ## Failure hook
//!
//! Validation failures are routed through an optional failure hook, a pure
//! function from the aggregated errors plus request context to a
//! [`HookDecision`]. The decision is an explicit tagged choice: either the
//! hook responded, or it falls through to the default 400 response. "The
//! hook returned nothing" is not a state that exists here.

mod core;

pub use core::{
    default_validation_response, Dispatcher, HandlerFn, HandlerRequest, HandlerResponse,
    HookDecision, RequestContext,
};

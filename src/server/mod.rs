//! # Server Module
//!
//! Transport adapter on `may_minihttp`. The core of this crate is
//! transport-agnostic; this module parses raw HTTP requests into the shapes
//! the pipeline consumes, runs find → validate → dispatch through
//! [`AppService::handle`], and writes the resulting JSON responses.
//!
//! Two fixed endpoints are served alongside the registered routes: the
//! machine-readable API document (default `/doc`) and a human-facing
//! reference viewer (default `/reference`) that renders it.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use service::AppService;

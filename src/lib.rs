//! # specsmith
//!
//! **specsmith** is a typed HTTP route registry for Rust: declare a route's
//! path template, method, input schemas and output schemas once, and get both
//! request validation and an OpenAPI document synthesized from the same
//! declarations. Validation and documentation cannot drift apart because they
//! read the same [`Schema`] values.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`schema`]** - the schema capability: a compiled JSON Schema paired
//!   with a documentation metadata side channel
//! - **[`registry`]** - immutable route descriptors, registration-time
//!   invariant checks, and segment-wise path matching
//! - **[`validator`]** - the request-validation pipeline that runs every
//!   declared binding and aggregates failures across locations
//! - **[`dispatcher`]** - handler dispatch for validated requests, plus the
//!   failure hook for invalid ones
//! - **[`openapi`]** - the document synthesizer that walks the registry and
//!   emits an OpenAPI-3.0-shaped JSON document
//! - **[`typed`]** - type-safe handler traits over the validated bundle
//! - **[`server`]** - transport adapter on `may_minihttp`, serving registered
//!   routes plus the `/doc` and `/reference` endpoints
//!
//! ## Data flow
//!
//! Registration time builds the registry; request time flows request →
//! validation pipeline → handler or failure hook → response; documentation
//! time flows registry → synthesizer → document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use http::Method;
//! use serde_json::json;
//! use specsmith::dispatcher::{Dispatcher, HandlerResponse};
//! use specsmith::openapi::ApiInfo;
//! use specsmith::registry::{RegistryBuilder, RouteDescriptor};
//! use specsmith::schema::Schema;
//! use specsmith::server::AppService;
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let params = Schema::new(json!({
//!         "type": "object",
//!         "properties": { "id": { "type": "string", "minLength": 3 } },
//!         "required": ["id"]
//!     }))?
//!     .with_field_example("id", json!("1212121"));
//!
//!     let user = Schema::named("User", json!({
//!         "type": "object",
//!         "properties": {
//!             "id": { "type": "string" },
//!             "name": { "type": "string" },
//!             "age": { "type": "integer" }
//!         },
//!         "required": ["id", "name", "age"]
//!     }))?;
//!
//!     let mut builder = RegistryBuilder::new();
//!     builder.register(
//!         RouteDescriptor::new(Method::GET, "/users/{id}", "get_user")
//!             .path_schema(params)
//!             .response(200, user, "Retrieve the user"),
//!     )?;
//!     let registry = Arc::new(builder.build());
//!
//!     let mut dispatcher = Dispatcher::new();
//!     dispatcher.register_handler("get_user", |req| {
//!         let id = req.params["id"].clone();
//!         HandlerResponse::new(200, json!({ "id": id, "name": "Ultra-man", "age": 20 }))
//!     });
//!
//!     let service = AppService::new(
//!         registry,
//!         Arc::new(dispatcher),
//!         ApiInfo::new("My API", "1.0.0"),
//!     );
//!     specsmith::server::HttpServer(service).start("0.0.0.0:8080")?.join().ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Each request's validation-and-dispatch sequence is synchronous; schema
//! validation is a pure in-memory computation with no blocking points. The
//! registry and dispatcher are built once at startup and read-only afterwards,
//! so concurrent requests share them without locking, and the synthesized
//! document is cached for the process lifetime.
//!
//! [`Schema`]: schema::Schema

pub mod dispatcher;
pub mod openapi;
pub mod registry;
pub mod schema;
pub mod server;
pub mod typed;
pub mod validator;

pub use dispatcher::{Dispatcher, HandlerRequest, HandlerResponse, HookDecision, RequestContext};
pub use openapi::{synthesize, ApiDoc, ApiInfo};
pub use registry::{
    DescriptorError, InputBindings, Location, Registry, RegistryBuilder, ResponseSpec,
    RouteDescriptor, RouteMatch,
};
pub use schema::Schema;
pub use validator::{validate_request, FieldError, RawRequest, ValidInput, Validation};

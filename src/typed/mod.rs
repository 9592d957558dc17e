//! # Typed Module
//!
//! Type-safe request handling on top of the dispatcher.
//!
//! Instead of reading `serde_json::Value` fields out of a raw
//! [`HandlerRequest`](crate::dispatcher::HandlerRequest), a typed handler
//! declares a params struct that is deserialized from the validated input
//! bundle before the business logic runs, and a response struct that is
//! serialized back to JSON.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serde::{Deserialize, Serialize};
//! use specsmith::typed::{Handler, TypedRequest};
//!
//! #[derive(Deserialize)]
//! struct GetUserParams {
//!     id: String,
//! }
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: String,
//!     name: String,
//!     age: u32,
//! }
//!
//! struct GetUser;
//!
//! impl Handler for GetUser {
//!     type Params = GetUserParams;
//!     type Response = User;
//!
//!     fn handle(&self, req: TypedRequest<GetUserParams>) -> (u16, User) {
//!         (200, User { id: req.params.id, name: "Ultra-man".into(), age: 20 })
//!     }
//! }
//! ```
//!
//! Registered through `Dispatcher::register_typed`, the conversion happens
//! after schema validation, so a failing deserialization indicates a gap
//! between the declared schema and the declared type rather than bad input.

mod core;

pub use core::{Handler, TypedRequest};

#![allow(dead_code)]

use http::Method;
use serde_json::json;
use specsmith::dispatcher::{Dispatcher, HandlerResponse};
use specsmith::registry::{Registry, RegistryBuilder, RouteDescriptor};
use specsmith::schema::Schema;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the test log subscriber once per test binary.
///
/// Honors `RUST_LOG`; output goes through the test writer so it is captured
/// per test.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Path-parameter schema from the user-lookup fixture: `id` must be a string
/// of at least three characters.
pub fn params_schema() -> Schema {
    Schema::new(json!({
        "type": "object",
        "properties": { "id": { "type": "string", "minLength": 3 } },
        "required": ["id"]
    }))
    .unwrap()
    .with_field_example("id", json!("1212121"))
}

/// The `User` component schema with per-field examples.
pub fn user_schema() -> Schema {
    Schema::named(
        "User",
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" },
                "age": { "type": "integer" }
            },
            "required": ["id", "name", "age"]
        }),
    )
    .unwrap()
    .with_field_example("id", json!("123"))
    .with_field_example("name", json!("John Doe"))
    .with_field_example("age", json!(42))
}

/// The error-body schema used for the 400 response.
pub fn error_schema() -> Schema {
    Schema::named(
        "Error",
        json!({
            "type": "object",
            "properties": {
                "code": { "type": "integer" },
                "message": { "type": "string" }
            },
            "required": ["code", "message"]
        }),
    )
    .unwrap()
    .with_field_example("code", json!(400))
    .with_field_example("message", json!("Bad Request"))
}

/// `GET /users/{id}` with a validated path param and two declared outputs.
pub fn user_route() -> RouteDescriptor {
    RouteDescriptor::new(Method::GET, "/users/{id}", "get_user")
        .path_schema(params_schema())
        .response(200, user_schema(), "Retrieve the user")
        .response(400, error_schema(), "Bad Request")
}

/// Registry containing only the user-lookup route.
pub fn user_registry() -> Registry {
    let mut builder = RegistryBuilder::new();
    builder.register(user_route()).unwrap();
    builder.build()
}

/// Dispatcher with the `get_user` handler echoing the validated id.
pub fn user_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_handler("get_user", |req| {
        HandlerResponse::new(
            200,
            json!({
                "id": req.params["id"],
                "name": "Ultra-man",
                "age": 20
            }),
        )
    });
    dispatcher
}

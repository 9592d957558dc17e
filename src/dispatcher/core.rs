use crate::validator::FieldError;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Request data passed to a handler.
///
/// Carries the validated input bundle: every location-level value has already
/// passed its declared schema, or is `Null` when the route declares no schema
/// for that location.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Concrete request path (not the template)
    pub path: String,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Validated path parameters, normalized per schema
    pub params: Value,
    /// Validated query parameters
    pub query: Value,
    /// Validated headers
    pub headers: Value,
    /// Validated request body
    pub body: Value,
}

/// Response returned by a handler: a status code plus JSON body.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// Request context handed to the failure hook alongside the errors.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
}

/// Explicit outcome of a failure hook invocation.
///
/// A hook that only wants to observe the errors returns `FallThrough` and
/// the default 400 response is produced.
#[derive(Debug, Clone)]
pub enum HookDecision {
    /// The hook produced the response to send.
    Responded(HandlerResponse),
    /// The hook declines; fall through to the default 400 response.
    FallThrough,
}

/// Boxed handler function invoked with a validated request.
pub type HandlerFn = Arc<dyn Fn(HandlerRequest) -> HandlerResponse + Send + Sync>;

type FailureHook = Arc<dyn Fn(&[FieldError], &RequestContext) -> HookDecision + Send + Sync>;

/// The default 400 response: a body mirroring the aggregated error list.
#[must_use]
pub fn default_validation_response(errors: &[FieldError]) -> HandlerResponse {
    HandlerResponse {
        status: 400,
        body: serde_json::json!({
            "code": 400,
            "message": "Validation Error",
            "errors": errors,
        }),
    }
}

/// Maps handler names to handler functions and owns the failure hook.
///
/// Built at startup alongside the registry; read-only while serving.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<String, HandlerFn>,
    failure_hook: Option<FailureHook>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler function under the given name.
    pub fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        debug!(handler_name = %name, "Handler registered");
        self.handlers.insert(name.to_string(), Arc::new(handler_fn));
    }

    /// Install the failure hook invoked on invalid requests.
    pub fn set_failure_hook<F>(&mut self, hook: F)
    where
        F: Fn(&[FieldError], &RequestContext) -> HookDecision + Send + Sync + 'static,
    {
        self.failure_hook = Some(Arc::new(hook));
    }

    /// Whether a handler is registered under `name`.
    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke the named handler with a validated request.
    ///
    /// Returns `None` when no handler is registered under the request's
    /// handler name. A panicking handler yields a 500 response instead of
    /// unwinding into the transport.
    #[must_use]
    pub fn dispatch(&self, request: HandlerRequest) -> Option<HandlerResponse> {
        let handler = self.handlers.get(&request.handler_name)?;
        let handler_name = request.handler_name.clone();

        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(request)));

        match result {
            Ok(response) => Some(response),
            Err(panic) => {
                error!(handler_name = %handler_name, panic = ?panic, "Handler panicked");
                Some(HandlerResponse {
                    status: 500,
                    body: serde_json::json!({
                        "error": "Handler panicked",
                        "details": format!("{:?}", panic)
                    }),
                })
            }
        }
    }

    /// Produce the response for an invalid request.
    ///
    /// Runs the failure hook when one is installed; on `FallThrough` or with
    /// no hook the default 400 response is returned.
    #[must_use]
    pub fn handle_invalid(&self, errors: &[FieldError], ctx: &RequestContext) -> HandlerResponse {
        if let Some(hook) = &self.failure_hook {
            match hook(errors, ctx) {
                HookDecision::Responded(response) => return response,
                HookDecision::FallThrough => {
                    warn!(
                        method = %ctx.method,
                        path = %ctx.path,
                        "Failure hook fell through to default response"
                    );
                }
            }
        }
        default_validation_response(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Location;
    use serde_json::json;

    fn request(name: &str) -> HandlerRequest {
        HandlerRequest {
            method: Method::GET,
            path: "/x".to_string(),
            handler_name: name.to_string(),
            params: Value::Null,
            query: Value::Null,
            headers: Value::Null,
            body: Value::Null,
        }
    }

    #[test]
    fn test_dispatch_unregistered_handler_is_none() {
        let d = Dispatcher::new();
        assert!(d.dispatch(request("missing")).is_none());
    }

    #[test]
    fn test_panicking_handler_becomes_500() {
        let mut d = Dispatcher::new();
        d.register_handler("boom", |_req| panic!("kaboom"));
        let resp = d.dispatch(request("boom")).unwrap();
        assert_eq!(resp.status, 500);
    }

    #[test]
    fn test_default_response_mirrors_errors() {
        let errors = vec![FieldError {
            location: Location::Path,
            field: "id".to_string(),
            message: "too short".to_string(),
        }];
        let resp = default_validation_response(&errors);
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body["code"], json!(400));
        assert_eq!(resp.body["message"], json!("Validation Error"));
        assert_eq!(resp.body["errors"][0]["location"], json!("path"));
    }
}

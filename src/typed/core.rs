use crate::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// Typed request data passed to a [`Handler`].
///
/// `params` is deserialized from the validated path-parameter bundle; the
/// other locations stay as JSON values for handlers that want them.
#[derive(Debug, Clone)]
pub struct TypedRequest<P> {
    pub method: Method,
    pub path: String,
    pub params: P,
    pub query: Value,
    pub headers: Value,
    pub body: Value,
}

/// Trait implemented by typed handlers.
///
/// The associated `Params` type is deserialized from the validated path
/// parameters, and the returned `(status, Response)` pair is serialized back
/// into the wire response.
pub trait Handler: Send + Sync + 'static {
    type Params: DeserializeOwned + Send + 'static;
    type Response: Serialize + Send + 'static;

    fn handle(&self, req: TypedRequest<Self::Params>) -> (u16, Self::Response);
}

impl Dispatcher {
    /// Register a typed handler under the given name.
    ///
    /// Deserialization runs after schema validation; a conversion failure
    /// means the declared schema and the declared `Params` type disagree, and
    /// is reported as a 500, not a validation error.
    pub fn register_typed<H>(&mut self, name: &str, handler: H)
    where
        H: Handler,
    {
        self.register_handler(name, move |req: HandlerRequest| {
            let params: H::Params = match serde_json::from_value(req.params.clone()) {
                Ok(p) => p,
                Err(err) => {
                    error!(
                        handler_name = %req.handler_name,
                        error = %err,
                        "Validated params did not deserialize into handler type"
                    );
                    return HandlerResponse::new(
                        500,
                        serde_json::json!({
                            "error": "Params schema and handler type disagree",
                            "message": err.to_string()
                        }),
                    );
                }
            };
            let typed = TypedRequest {
                method: req.method,
                path: req.path,
                params,
                query: req.query,
                headers: req.headers,
                body: req.body,
            };
            let (status, response) = handler.handle(typed);
            match serde_json::to_value(response) {
                Ok(body) => HandlerResponse::new(status, body),
                Err(err) => HandlerResponse::new(
                    500,
                    serde_json::json!({
                        "error": "Failed to serialize response",
                        "message": err.to_string()
                    }),
                ),
            }
        });
    }
}

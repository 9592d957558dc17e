use super::request::{parse_request, ParsedRequest};
use super::response::{write_html, write_json_error, write_json_response};
use crate::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse, RequestContext};
use crate::openapi::{ApiDoc, ApiInfo};
use crate::registry::{Registry, RouteDescriptor, RouteMatch};
use crate::validator::{validate_request, RawRequest, Validation};
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;

/// Minimal page that points the Scalar reference renderer at the doc URL.
const REFERENCE_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <title>API Reference</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
  </head>
  <body>
    <script id="api-reference" data-url="/doc"></script>
    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
  </body>
</html>
"#;

/// The transport-facing service: registry, dispatcher and document cache.
///
/// All fields are immutable after construction; clones share the same
/// registry and dispatcher, so one `AppService` per connection is cheap.
#[derive(Clone)]
pub struct AppService {
    pub registry: Arc<Registry>,
    pub dispatcher: Arc<Dispatcher>,
    doc: Arc<ApiDoc>,
    /// Path serving the synthesized document as JSON.
    pub doc_path: String,
    /// Path serving the human-facing reference viewer.
    pub reference_path: String,
    /// Strict mode: check handler responses against declared output schemas.
    pub check_outputs: bool,
}

impl AppService {
    #[must_use]
    pub fn new(registry: Arc<Registry>, dispatcher: Arc<Dispatcher>, info: ApiInfo) -> Self {
        Self {
            doc: Arc::new(ApiDoc::new(Arc::clone(&registry), info)),
            registry,
            dispatcher,
            doc_path: "/doc".to_string(),
            reference_path: "/reference".to_string(),
            check_outputs: false,
        }
    }

    /// Enable runtime checking of handler responses against the declared
    /// output schemas. Off by default; output conformance is a contract.
    #[must_use]
    pub fn with_output_checking(mut self) -> Self {
        self.check_outputs = true;
        self
    }

    /// The synthesized API document (cached after the first call).
    #[must_use]
    pub fn document(&self) -> &serde_json::Value {
        self.doc.document()
    }

    /// The dispatch entry point: find → validate → dispatch or failure hook.
    ///
    /// Every outcome is a response value; validation failures and handler
    /// faults never propagate as errors out of this method.
    #[must_use]
    pub fn handle(&self, method: Method, path: &str, raw: RawRequest) -> HandlerResponse {
        let Some(route_match) = self.registry.find(&method, path) else {
            return HandlerResponse::new(
                404,
                json!({ "error": "Not Found", "method": method.as_str(), "path": path }),
            );
        };

        match validate_request(&route_match.route, &route_match.path_params, &raw) {
            Validation::Invalid(errors) => {
                let ctx = RequestContext {
                    method,
                    path: path.to_string(),
                };
                self.dispatcher.handle_invalid(&errors, &ctx)
            }
            Validation::Valid(bundle) => {
                let response = self.dispatch_valid(&route_match, method, path, bundle);
                if self.check_outputs {
                    check_output(&route_match.route, response)
                } else {
                    response
                }
            }
        }
    }

    fn dispatch_valid(
        &self,
        route_match: &RouteMatch,
        method: Method,
        path: &str,
        bundle: crate::validator::ValidInput,
    ) -> HandlerResponse {
        let request = HandlerRequest {
            method,
            path: path.to_string(),
            handler_name: route_match.route.handler_name.clone(),
            params: bundle.params,
            query: bundle.query,
            headers: bundle.headers,
            body: bundle.body,
        };
        match self.dispatcher.dispatch(request) {
            Some(response) => response,
            None => HandlerResponse::new(
                500,
                json!({
                    "error": "Handler failed or not registered",
                    "handler": route_match.route.handler_name,
                }),
            ),
        }
    }
}

/// Strict-mode output check: the status must be declared and the body must
/// satisfy that status's schema. Violations are server bugs, reported as 500.
fn check_output(route: &RouteDescriptor, response: HandlerResponse) -> HandlerResponse {
    let Some(spec) = route.outputs.get(&response.status) else {
        return HandlerResponse::new(
            500,
            json!({
                "error": "Undeclared response status",
                "status": response.status,
            }),
        );
    };
    match spec.schema.check(&response.body) {
        Ok(()) => response,
        Err(violations) => {
            let details: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
            HandlerResponse::new(
                500,
                json!({ "error": "Response validation failed", "details": details }),
            )
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            headers,
            query_params,
            body,
        } = parse_request(req);

        if method == "GET" && path == self.doc_path {
            write_json_response(res, 200, self.document());
            return Ok(());
        }
        if method == "GET" && path == self.reference_path {
            write_html(res, REFERENCE_HTML);
            return Ok(());
        }

        let method = match method.parse::<Method>() {
            Ok(m) => m,
            Err(_) => {
                write_json_error(res, 400, json!({ "error": "Unsupported method" }));
                return Ok(());
            }
        };

        let raw = RawRequest {
            query: query_params,
            headers,
            body,
        };
        let response = self.handle(method, &path, raw);
        write_json_response(res, response.status, &response.body);
        Ok(())
    }
}

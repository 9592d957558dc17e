use crate::registry::{Location, Registry, RouteDescriptor};
use crate::schema::Schema;
use once_cell::sync::OnceCell;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

/// Title and version carried into the document's `info` object.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

impl ApiInfo {
    #[must_use]
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
        }
    }
}

/// Cached document for one registry.
///
/// The registry is bound at construction and read-only after `build()`, so
/// the first synthesis result stays valid for the life of the `ApiDoc`; a
/// new registry means a new `ApiDoc`.
#[derive(Debug)]
pub struct ApiDoc {
    registry: Arc<Registry>,
    info: ApiInfo,
    cell: OnceCell<Value>,
}

impl ApiDoc {
    #[must_use]
    pub fn new(registry: Arc<Registry>, info: ApiInfo) -> Self {
        Self {
            registry,
            info,
            cell: OnceCell::new(),
        }
    }

    /// The synthesized document, computed on first access.
    pub fn document(&self) -> &Value {
        self.cell
            .get_or_init(|| synthesize(&self.registry, &self.info))
    }
}

/// Walk the registry and emit the complete API description document.
///
/// Infallible given a built registry: every invariant the document format
/// needs (outputs present, placeholders bound) was enforced at registration.
#[must_use]
pub fn synthesize(registry: &Registry, info: &ApiInfo) -> Value {
    let mut components: Map<String, Value> = Map::new();
    let mut paths: Map<String, Value> = Map::new();

    for descriptor in registry.all() {
        let operation = synthesize_operation(descriptor, &mut components);
        let method_key = descriptor.method.as_str().to_ascii_lowercase();
        match paths.get_mut(&descriptor.path) {
            Some(Value::Object(item)) => {
                item.insert(method_key, operation);
            }
            _ => {
                let mut item = Map::new();
                item.insert(method_key, operation);
                paths.insert(descriptor.path.clone(), Value::Object(item));
            }
        }
    }

    let mut doc = Map::new();
    doc.insert("openapi".to_string(), json!("3.0.0"));
    doc.insert(
        "info".to_string(),
        json!({ "title": info.title, "version": info.version }),
    );
    doc.insert("paths".to_string(), Value::Object(paths));
    if !components.is_empty() {
        doc.insert(
            "components".to_string(),
            json!({ "schemas": components }),
        );
    }

    info!(
        routes_count = registry.len(),
        title = %info.title,
        "API document synthesized"
    );
    Value::Object(doc)
}

/// Emit one operation object: parameters, request body, responses, in that
/// fixed order.
fn synthesize_operation(
    descriptor: &RouteDescriptor,
    components: &mut Map<String, Value>,
) -> Value {
    let mut operation = Map::new();
    operation.insert(
        "operationId".to_string(),
        json!(descriptor.handler_name),
    );

    let mut parameters: Vec<Value> = Vec::new();
    for location in [Location::Path, Location::Query, Location::Header] {
        if let Some(schema) = descriptor.inputs.get(location) {
            parameters.extend(synthesize_parameters(location, schema));
        }
    }
    if !parameters.is_empty() {
        operation.insert("parameters".to_string(), Value::Array(parameters));
    }

    if let Some(body) = &descriptor.inputs.body {
        operation.insert(
            "requestBody".to_string(),
            json!({
                "required": true,
                "content": { "application/json": { "schema": reify(body, components) } }
            }),
        );
    }

    let mut responses = Map::new();
    for (status, spec) in &descriptor.outputs {
        responses.insert(
            status.to_string(),
            json!({
                "description": spec.description,
                "content": { "application/json": { "schema": reify(&spec.schema, components) } }
            }),
        );
    }
    operation.insert("responses".to_string(), Value::Object(responses));

    Value::Object(operation)
}

/// One parameter entry per schema property, in declaration order.
fn synthesize_parameters(location: Location, schema: &Schema) -> Vec<Value> {
    schema
        .property_names()
        .into_iter()
        .map(|name| {
            let mut param = Map::new();
            param.insert("name".to_string(), json!(name));
            param.insert("in".to_string(), json!(location.as_str()));
            param.insert("required".to_string(), json!(schema.is_required(name)));
            if let Some(prop) = schema.property(name) {
                param.insert("schema".to_string(), prop.clone());
            }
            if let Some(example) = schema.meta().field_examples.get(name) {
                param.insert("example".to_string(), example.clone());
            }
            Value::Object(param)
        })
        .collect()
}

/// Reify a schema for the document.
///
/// Named schemas are hoisted into `components.schemas` and referenced with
/// `$ref`; anonymous schemas are inlined. Either way the rendered value is
/// the enforced schema plus its attached examples. Registration already
/// rejected two different schemas under one name, so an existing component
/// entry is always the same rendered value.
fn reify(schema: &Schema, components: &mut Map<String, Value>) -> Value {
    let rendered = schema.render();
    match &schema.meta().name {
        Some(name) => {
            components.entry(name.clone()).or_insert(rendered);
            json!({ "$ref": format!("#/components/schemas/{name}") })
        }
        None => rendered,
    }
}

use crate::registry::{Location, ParamVec, RouteDescriptor};
use crate::schema::Schema;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Raw, unvalidated request inputs as the transport hands them over.
///
/// Path parameters are not part of this struct; they come from the route
/// match. Header keys are expected lowercased.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// One aggregated validation failure, tagged with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: Location,
    pub field: String,
    pub message: String,
}

/// Fully validated input bundle, one normalized value per location.
///
/// Undeclared locations are `Value::Null` (skipped, not validated-empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidInput {
    pub params: Value,
    pub query: Value,
    pub headers: Value,
    pub body: Value,
}

/// Tagged outcome of running every declared schema binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(ValidInput),
    Invalid(Vec<FieldError>),
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

/// Run the descriptor's schema bindings against the raw request.
///
/// Visits locations in [`Location::ORDER`] and aggregates every failing
/// location's errors instead of short-circuiting. Pure: no handler logic
/// executes here.
#[must_use]
pub fn validate_request(
    descriptor: &RouteDescriptor,
    path_params: &ParamVec,
    raw: &RawRequest,
) -> Validation {
    let mut errors: Vec<FieldError> = Vec::new();
    let mut bundle = ValidInput {
        params: Value::Null,
        query: Value::Null,
        headers: Value::Null,
        body: Value::Null,
    };

    for location in Location::ORDER {
        let Some(schema) = descriptor.inputs.get(location) else {
            continue;
        };
        match build_instance(location, schema, path_params, raw) {
            Ok(instance) => match schema.check(&instance) {
                Ok(()) => match location {
                    Location::Path => bundle.params = instance,
                    Location::Query => bundle.query = instance,
                    Location::Header => bundle.headers = instance,
                    Location::Body => bundle.body = instance,
                },
                Err(violations) => {
                    errors.extend(violations.into_iter().map(|v| FieldError {
                        location,
                        field: v.field,
                        message: v.message,
                    }));
                }
            },
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            "Request inputs validated"
        );
        Validation::Valid(bundle)
    } else {
        warn!(
            method = %descriptor.method,
            path = %descriptor.path,
            error_count = errors.len(),
            "Request validation failed"
        );
        Validation::Invalid(errors)
    }
}

/// Assemble the JSON instance a location's schema validates.
///
/// String-sourced locations (path, query, header) become objects whose
/// members are coerced to the schema-declared property types. The body is
/// passed through as parsed; a declared body schema with no body present is
/// itself a body-location error.
fn build_instance(
    location: Location,
    schema: &Schema,
    path_params: &ParamVec,
    raw: &RawRequest,
) -> Result<Value, FieldError> {
    match location {
        Location::Path => {
            let mut obj = Map::new();
            for (name, value) in path_params {
                obj.insert(
                    name.to_string(),
                    coerce_value(value, schema.property(name)),
                );
            }
            Ok(Value::Object(obj))
        }
        Location::Query => {
            let mut obj = Map::new();
            for name in schema.property_names() {
                if let Some(value) = raw.query.get(name) {
                    obj.insert(name.to_string(), coerce_value(value, schema.property(name)));
                }
            }
            Ok(Value::Object(obj))
        }
        Location::Header => {
            let mut obj = Map::new();
            for name in schema.property_names() {
                if let Some(value) = raw.headers.get(&name.to_ascii_lowercase()) {
                    obj.insert(name.to_string(), coerce_value(value, schema.property(name)));
                }
            }
            Ok(Value::Object(obj))
        }
        Location::Body => match &raw.body {
            Some(body) => Ok(body.clone()),
            None => Err(FieldError {
                location: Location::Body,
                field: String::new(),
                message: "request body required".to_string(),
            }),
        },
    }
}

/// Coerce a raw string value to the type its schema declares.
///
/// Unparseable values are left as strings so the schema engine reports the
/// type mismatch instead of the coercion swallowing it.
fn coerce_value(value: &str, schema: Option<&Value>) -> Value {
    fn convert_primitive(val: &str, schema: Option<&Value>) -> Value {
        if let Some(ty) = schema.and_then(|s| s.get("type").and_then(|v| v.as_str())) {
            match ty {
                "integer" => val
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "number" => val
                    .parse::<f64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                "boolean" => val
                    .parse::<bool>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::String(val.to_string())),
                _ => Value::String(val.to_string()),
            }
        } else {
            Value::String(val.to_string())
        }
    }

    if let Some(ty) = schema.and_then(|s| s.get("type").and_then(|v| v.as_str())) {
        match ty {
            "array" => {
                let items_schema = schema.and_then(|s| s.get("items"));
                let parts = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(|p| convert_primitive(p.trim(), items_schema))
                    .collect::<Vec<_>>();
                Value::Array(parts)
            }
            "object" => serde_json::from_str(value).unwrap_or(Value::String(value.to_string())),
            _ => convert_primitive(value, schema),
        }
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce_value("42", Some(&json!({"type": "integer"}))), json!(42));
    }

    #[test]
    fn test_coerce_unparseable_stays_string() {
        assert_eq!(
            coerce_value("abc", Some(&json!({"type": "integer"}))),
            json!("abc")
        );
    }

    #[test]
    fn test_coerce_array_of_integers() {
        assert_eq!(
            coerce_value(
                "1,2,3",
                Some(&json!({"type": "array", "items": {"type": "integer"}}))
            ),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn test_coerce_without_schema_is_identity() {
        assert_eq!(coerce_value("7", None), json!("7"));
    }
}

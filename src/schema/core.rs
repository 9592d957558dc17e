use anyhow::Context;
use jsonschema::Validator;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Documentation metadata attached to a [`Schema`].
///
/// Lives next to the validation schema but never participates in validation.
#[derive(Debug, Clone, Default)]
pub struct SchemaMeta {
    /// Component name used when the schema is hoisted into
    /// `components.schemas` of the synthesized document.
    pub name: Option<String>,
    /// Human-readable description of the schema.
    pub description: Option<String>,
    /// Example value for the schema as a whole.
    pub example: Option<Value>,
    /// Example values for individual fields, keyed by property name.
    pub field_examples: HashMap<String, Value>,
}

/// A single field-level validation failure.
///
/// `field` is a dotted path into the validated instance (empty for the
/// instance root), `message` is the engine's human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// An immutable validate-and-describe capability.
///
/// Pairs a compiled JSON Schema with a [`SchemaMeta`] side channel. Cloning is
/// cheap (`Arc` internally); the compiled validator is shared between the
/// request pipeline and the document synthesizer.
#[derive(Clone)]
pub struct Schema {
    raw: Arc<Value>,
    compiled: Arc<Validator>,
    meta: Arc<SchemaMeta>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("raw", &self.raw)
            .field("meta", &self.meta)
            .finish()
    }
}

impl Schema {
    /// Compile a JSON Schema value into a reusable validator.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a valid JSON Schema.
    pub fn new(raw: Value) -> anyhow::Result<Self> {
        let compiled = jsonschema::validator_for(&raw)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("failed to compile schema")?;
        Ok(Self {
            raw: Arc::new(raw),
            compiled: Arc::new(compiled),
            meta: Arc::new(SchemaMeta::default()),
        })
    }

    /// Compile a schema and attach a component name in one step.
    ///
    /// Named schemas are emitted into `components.schemas` of the synthesized
    /// document and referenced with `$ref` at every use site.
    pub fn named(name: &str, raw: Value) -> anyhow::Result<Self> {
        Ok(Self::new(raw)?.with_name(name))
    }

    /// Attach a component name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        Arc::make_mut(&mut self.meta).name = Some(name.to_string());
        self
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        Arc::make_mut(&mut self.meta).description = Some(description.to_string());
        self
    }

    /// Attach an example value for the schema as a whole.
    #[must_use]
    pub fn with_example(mut self, example: Value) -> Self {
        Arc::make_mut(&mut self.meta).example = Some(example);
        self
    }

    /// Attach an example value for a single property.
    #[must_use]
    pub fn with_field_example(mut self, field: &str, example: Value) -> Self {
        Arc::make_mut(&mut self.meta)
            .field_examples
            .insert(field.to_string(), example);
        self
    }

    /// The raw JSON Schema this capability was compiled from.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The attached documentation metadata.
    #[must_use]
    pub fn meta(&self) -> &SchemaMeta {
        &self.meta
    }

    /// Validate an instance, returning every violation the engine reports.
    ///
    /// Pure and deterministic: the same instance always yields the same
    /// result. An empty `Err` vec is never produced.
    pub fn check(&self, instance: &Value) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .compiled
            .iter_errors(instance)
            .map(|e| Violation {
                field: pointer_to_field(&e.instance_path().to_string()),
                message: e.to_string(),
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Names of `properties` in declaration order.
    ///
    /// Empty for schemas without a `properties` object.
    pub fn property_names(&self) -> Vec<&str> {
        self.raw
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The sub-schema declared for a property, if any.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.raw.get("properties").and_then(|p| p.get(name))
    }

    /// Render the schema for documentation: the raw schema with the metadata
    /// side channel folded in. Per-field examples land on their properties,
    /// the whole-schema example and description at the top level. Existing
    /// members of the raw schema are never overwritten.
    #[must_use]
    pub fn render(&self) -> Value {
        let mut rendered = (*self.raw).clone();
        let meta = self.meta();
        if let Value::Object(obj) = &mut rendered {
            if let Some(description) = &meta.description {
                obj.entry("description".to_string())
                    .or_insert_with(|| Value::String(description.clone()));
            }
            if let Some(example) = &meta.example {
                obj.entry("example".to_string())
                    .or_insert_with(|| example.clone());
            }
            if let Some(Value::Object(props)) = obj.get_mut("properties") {
                for (field, example) in &meta.field_examples {
                    if let Some(Value::Object(prop)) = props.get_mut(field) {
                        prop.entry("example".to_string())
                            .or_insert_with(|| example.clone());
                    }
                }
            }
        }
        rendered
    }

    /// Whether a property appears in the schema's `required` array.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|req| req.iter().any(|v| v.as_str() == Some(name)))
            .unwrap_or(false)
    }
}

/// Convert a JSON-pointer instance path (`/a/0/b`) into a dotted field path
/// (`a.0.b`). The root pointer becomes the empty string.
fn pointer_to_field(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id_schema() -> Schema {
        Schema::new(json!({
            "type": "object",
            "properties": { "id": { "type": "string", "minLength": 3 } },
            "required": ["id"]
        }))
        .unwrap()
    }

    #[test]
    fn test_check_accepts_valid_instance() {
        assert!(id_schema().check(&json!({ "id": "1212121" })).is_ok());
    }

    #[test]
    fn test_check_reports_field_path() {
        let errs = id_schema().check(&json!({ "id": "ab" })).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "id");
    }

    #[test]
    fn test_metadata_does_not_affect_validation() {
        let plain = id_schema();
        let decorated = id_schema()
            .with_name("Params")
            .with_field_example("id", json!("1212121"));
        let instance = json!({ "id": "ab" });
        assert_eq!(
            plain.check(&instance).is_err(),
            decorated.check(&instance).is_err()
        );
    }

    #[test]
    fn test_property_names_in_declaration_order() {
        let s = Schema::new(json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" }
            }
        }))
        .unwrap();
        assert_eq!(s.property_names(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_pointer_to_field() {
        assert_eq!(pointer_to_field(""), "");
        assert_eq!(pointer_to_field("/id"), "id");
        assert_eq!(pointer_to_field("/items/0/name"), "items.0.name");
    }
}

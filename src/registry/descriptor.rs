use crate::schema::Schema;
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Where a request input lives.
///
/// The validation pipeline visits locations in the order they are declared
/// here: path errors surface before query errors, and body errors last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Header,
    Body,
}

impl Location {
    /// All locations in validation order.
    pub const ORDER: [Location; 4] = [
        Location::Path,
        Location::Query,
        Location::Header,
        Location::Body,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Header => "header",
            Location::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named schema bindings for each input location.
///
/// A location with no binding is skipped by the validation pipeline, not
/// treated as validated-empty.
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    pub path: Option<Schema>,
    pub query: Option<Schema>,
    pub header: Option<Schema>,
    pub body: Option<Schema>,
}

impl InputBindings {
    #[must_use]
    pub fn get(&self, location: Location) -> Option<&Schema> {
        match location {
            Location::Path => self.path.as_ref(),
            Location::Query => self.query.as_ref(),
            Location::Header => self.header.as_ref(),
            Location::Body => self.body.as_ref(),
        }
    }
}

/// Output schema plus description for one declared status code.
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    pub schema: Schema,
    pub description: String,
}

/// Immutable record describing one endpoint.
///
/// Built once with the fluent constructors, then handed to
/// [`RegistryBuilder::register`](crate::registry::RegistryBuilder::register).
/// Construction has no side effects; nothing is routable until the
/// descriptor is registered.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub method: Method,
    /// Path template with `{name}` placeholders, e.g. `/users/{id}`.
    pub path: String,
    /// Name the dispatcher resolves to a handler function.
    pub handler_name: String,
    pub inputs: InputBindings,
    /// Declared outputs by status code, ascending.
    pub outputs: BTreeMap<u16, ResponseSpec>,
}

impl RouteDescriptor {
    #[must_use]
    pub fn new(method: Method, path: &str, handler_name: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            handler_name: handler_name.to_string(),
            inputs: InputBindings::default(),
            outputs: BTreeMap::new(),
        }
    }

    /// Bind a schema to the path-parameter location.
    #[must_use]
    pub fn path_schema(mut self, schema: Schema) -> Self {
        self.inputs.path = Some(schema);
        self
    }

    /// Bind a schema to the query location.
    #[must_use]
    pub fn query_schema(mut self, schema: Schema) -> Self {
        self.inputs.query = Some(schema);
        self
    }

    /// Bind a schema to the header location.
    #[must_use]
    pub fn header_schema(mut self, schema: Schema) -> Self {
        self.inputs.header = Some(schema);
        self
    }

    /// Bind a schema to the request body.
    #[must_use]
    pub fn body_schema(mut self, schema: Schema) -> Self {
        self.inputs.body = Some(schema);
        self
    }

    /// Declare an output schema for a status code.
    #[must_use]
    pub fn response(mut self, status: u16, schema: Schema, description: &str) -> Self {
        self.outputs.insert(
            status,
            ResponseSpec {
                schema,
                description: description.to_string(),
            },
        );
        self
    }

    /// Every schema the descriptor binds, inputs then outputs.
    pub(crate) fn schemas(&self) -> impl Iterator<Item = &Schema> {
        Location::ORDER
            .iter()
            .filter_map(|location| self.inputs.get(*location))
            .chain(self.outputs.values().map(|spec| &spec.schema))
    }

    /// Placeholder names in template order.
    pub(crate) fn placeholders(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|seg| {
                seg.strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
            })
            .collect()
    }
}

/// Registration-time contract violation.
///
/// Fatal to startup; a registry is never built from a descriptor that
/// violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// A descriptor with the same `(method, path)` is already registered.
    DuplicateRoute { method: Method, path: String },
    /// A `{name}` placeholder has no matching property in the path schema.
    UnboundPlaceholder { path: String, name: String },
    /// The descriptor declares no outputs.
    NoOutputs { method: Method, path: String },
    /// A named schema differs from the schema already registered under the
    /// same component name.
    ComponentConflict { name: String },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::DuplicateRoute { method, path } => {
                write!(f, "duplicate route registration: {method} {path}")
            }
            DescriptorError::UnboundPlaceholder { path, name } => {
                write!(
                    f,
                    "path template '{path}' declares placeholder '{{{name}}}' \
                     with no matching property in the path schema"
                )
            }
            DescriptorError::NoOutputs { method, path } => {
                write!(f, "route {method} {path} declares no outputs")
            }
            DescriptorError::ComponentConflict { name } => {
                write!(
                    f,
                    "component name '{name}' is already bound to a different schema"
                )
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

use super::descriptor::{DescriptorError, RouteDescriptor};
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the request path.
///
/// Param names use `Arc<str>` because they come from the static route table
/// known at startup; values are per-request data extracted from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// One segment of a decomposed path template.
#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
}

/// A registered route with its template pre-decomposed for matching.
#[derive(Debug, Clone)]
struct CompiledRoute {
    descriptor: Arc<RouteDescriptor>,
    segments: Vec<Segment>,
}

/// Result of successfully resolving a request path against the registry.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched descriptor (`Arc` to avoid cloning schemas per request).
    pub route: Arc<RouteDescriptor>,
    /// Placeholder values extracted from the URL, in template order.
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get an extracted path parameter by name.
    ///
    /// Last write wins when a template repeats a placeholder name at
    /// different depths.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Single-writer builder that produces an immutable [`Registry`].
///
/// All descriptor invariants are enforced here, so the registry itself never
/// holds an invalid route and document synthesis cannot fail downstream.
#[derive(Default)]
pub struct RegistryBuilder {
    routes: Vec<CompiledRoute>,
    seen: HashSet<(Method, String)>,
    /// Rendered schema per component name, for conflict detection.
    components: HashMap<String, Value>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, enforcing the registration invariants:
    /// placeholder coverage, at least one output, unique `(method, path)`,
    /// and one schema per component name across the whole registry.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] naming the violated invariant. The
    /// builder is left unchanged on error.
    pub fn register(&mut self, descriptor: RouteDescriptor) -> Result<(), DescriptorError> {
        let key = (descriptor.method.clone(), descriptor.path.clone());
        if self.seen.contains(&key) {
            return Err(DescriptorError::DuplicateRoute {
                method: key.0,
                path: key.1,
            });
        }
        if descriptor.outputs.is_empty() {
            return Err(DescriptorError::NoOutputs {
                method: key.0,
                path: key.1,
            });
        }
        for name in descriptor.placeholders() {
            let bound = descriptor
                .inputs
                .path
                .as_ref()
                .map(|schema| schema.property(name).is_some())
                .unwrap_or(false);
            if !bound {
                return Err(DescriptorError::UnboundPlaceholder {
                    path: descriptor.path.clone(),
                    name: name.to_string(),
                });
            }
        }

        // Two different schemas under one component name would leave the
        // document referencing a schema some routes do not enforce.
        let mut named: Vec<(String, Value)> = Vec::new();
        for schema in descriptor.schemas() {
            let Some(name) = schema.meta().name.clone() else {
                continue;
            };
            let rendered = schema.render();
            if let Some(existing) = self.components.get(&name) {
                if *existing != rendered {
                    return Err(DescriptorError::ComponentConflict { name });
                }
                continue;
            }
            match named.iter().position(|(n, _)| *n == name) {
                Some(idx) if named[idx].1 != rendered => {
                    return Err(DescriptorError::ComponentConflict { name });
                }
                Some(_) => {}
                None => named.push((name, rendered)),
            }
        }
        self.components.extend(named);

        let segments = decompose(&descriptor.path);
        debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            handler_name = %descriptor.handler_name,
            "Route registered"
        );
        self.seen.insert(key);
        self.routes.push(CompiledRoute {
            descriptor: Arc::new(descriptor),
            segments,
        });
        Ok(())
    }

    /// Freeze the builder into a read-only registry.
    #[must_use]
    pub fn build(self) -> Registry {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.descriptor.method, r.descriptor.path))
            .collect();
        info!(
            routes_count = self.routes.len(),
            routes_summary = ?routes_summary,
            "Route registry built"
        );
        Registry {
            routes: self.routes,
        }
    }
}

/// Ordered, immutable collection of route descriptors.
///
/// Built once at startup via [`RegistryBuilder`]; read-only afterwards, so
/// concurrent requests and document synthesis share it without locking.
#[derive(Debug, Clone)]
pub struct Registry {
    routes: Vec<CompiledRoute>,
}

impl Registry {
    /// Resolve a concrete request path against the registered templates.
    ///
    /// A path matches a template iff segment counts are equal and every
    /// literal segment matches exactly. Among structurally ambiguous
    /// templates the first registered wins.
    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let request_segments: Vec<&str> = split_path(path);

        for route in &self.routes {
            if route.descriptor.method != *method {
                continue;
            }
            if let Some(params) = match_segments(&route.segments, &request_segments) {
                info!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.descriptor.path,
                    handler_name = %route.descriptor.handler_name,
                    path_params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    route: Arc::clone(&route.descriptor),
                    path_params: params,
                });
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// Iterate descriptors in registration order.
    ///
    /// Finite and restartable; used by the document synthesizer.
    pub fn all(&self) -> impl Iterator<Item = &Arc<RouteDescriptor>> {
        self.routes.iter().map(|r| &r.descriptor)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// Only the leading slash is stripped: a trailing slash yields a trailing
// empty segment, so `/users/abc/` does not match `/users/{id}`.
fn split_path(path: &str) -> Vec<&str> {
    path.trim_start_matches('/').split('/').collect()
}

fn decompose(template: &str) -> Vec<Segment> {
    split_path(template)
        .into_iter()
        .map(|seg| {
            match seg
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
            {
                Some(name) => Segment::Param(Arc::from(name)),
                None => Segment::Literal(seg.to_string()),
            }
        })
        .collect()
}

fn match_segments(template: &[Segment], request: &[&str]) -> Option<ParamVec> {
    if template.len() != request.len() {
        return None;
    }
    let mut params = ParamVec::new();
    for (seg, value) in template.iter().zip(request) {
        match seg {
            Segment::Literal(lit) => {
                if lit != value {
                    return None;
                }
            }
            Segment::Param(name) => {
                params.push((Arc::clone(name), (*value).to_string()));
            }
        }
    }
    Some(params)
}

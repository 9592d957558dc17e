mod common;

use common::{user_registry, user_schema};
use http::Method;
use serde_json::json;
use specsmith::openapi::{synthesize, ApiDoc, ApiInfo};
use specsmith::registry::{RegistryBuilder, RouteDescriptor};
use specsmith::schema::Schema;
use std::sync::Arc;

fn info() -> ApiInfo {
    ApiInfo::new("My API", "1.0.0")
}

#[test]
fn test_document_skeleton() {
    let doc = synthesize(&user_registry(), &info());
    assert_eq!(doc["openapi"], json!("3.0.0"));
    assert_eq!(doc["info"], json!({ "title": "My API", "version": "1.0.0" }));
    assert!(doc["paths"]["/users/{id}"]["get"].is_object());
}

#[test]
fn test_user_route_parameters_and_responses() {
    let doc = synthesize(&user_registry(), &info());
    let op = &doc["paths"]["/users/{id}"]["get"];

    let param = &op["parameters"][0];
    assert_eq!(param["name"], json!("id"));
    assert_eq!(param["in"], json!("path"));
    assert_eq!(param["required"], json!(true));
    assert_eq!(param["example"], json!("1212121"));
    assert_eq!(param["schema"]["minLength"], json!(3));

    // Responses by ascending status, each referencing its component schema.
    let responses = op["responses"].as_object().unwrap();
    let statuses: Vec<&str> = responses.keys().map(String::as_str).collect();
    assert_eq!(statuses, vec!["200", "400"]);
    assert_eq!(responses["200"]["description"], json!("Retrieve the user"));
    assert_eq!(
        responses["200"]["content"]["application/json"]["schema"]["$ref"],
        json!("#/components/schemas/User")
    );
}

#[test]
fn test_components_carry_enforced_schema_and_examples() {
    let doc = synthesize(&user_registry(), &info());
    let user = &doc["components"]["schemas"]["User"];
    // The documented schema is the enforced one, with the metadata examples
    // folded onto its properties.
    assert_eq!(user["properties"]["id"], json!({ "type": "string", "example": "123" }));
    assert_eq!(
        user["properties"]["name"],
        json!({ "type": "string", "example": "John Doe" })
    );
    assert_eq!(
        user["properties"]["age"],
        json!({ "type": "integer", "example": 42 })
    );
    assert_eq!(user["required"], json!(["id", "name", "age"]));
}

#[test]
fn test_synthesize_is_idempotent_and_byte_identical() {
    let registry = user_registry();
    let first = synthesize(&registry, &info());
    let second = synthesize(&registry, &info());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_paths_follow_registration_order() {
    let out = user_schema();
    let mut builder = RegistryBuilder::new();
    builder
        .register(RouteDescriptor::new(Method::GET, "/zebras", "list_zebras").response(200, out.clone(), "OK"))
        .unwrap();
    builder
        .register(RouteDescriptor::new(Method::GET, "/apples", "list_apples").response(200, out, "OK"))
        .unwrap();
    let doc = synthesize(&builder.build(), &info());

    let keys: Vec<&str> = doc["paths"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["/zebras", "/apples"]);
}

#[test]
fn test_methods_merge_under_one_path_item() {
    let out = user_schema();
    let mut builder = RegistryBuilder::new();
    builder
        .register(RouteDescriptor::new(Method::GET, "/users", "list_users").response(200, out.clone(), "OK"))
        .unwrap();
    builder
        .register(RouteDescriptor::new(Method::POST, "/users", "create_user").response(201, out, "Created"))
        .unwrap();
    let doc = synthesize(&builder.build(), &info());

    let item = doc["paths"]["/users"].as_object().unwrap();
    let methods: Vec<&str> = item.keys().map(String::as_str).collect();
    assert_eq!(methods, vec!["get", "post"]);
    assert_eq!(item["get"]["operationId"], json!("list_users"));
    assert_eq!(item["post"]["operationId"], json!("create_user"));
}

#[test]
fn test_request_body_is_documented_when_declared() {
    let body = Schema::new(json!({
        "type": "object",
        "properties": { "text": { "type": "string" } },
        "required": ["text"]
    }))
    .unwrap();
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            RouteDescriptor::new(Method::POST, "/notes", "create_note")
                .body_schema(body)
                .response(201, user_schema(), "Created"),
        )
        .unwrap();
    let doc = synthesize(&builder.build(), &info());

    let rb = &doc["paths"]["/notes"]["post"]["requestBody"];
    assert_eq!(rb["required"], json!(true));
    assert_eq!(
        rb["content"]["application/json"]["schema"]["properties"]["text"]["type"],
        json!("string")
    );
}

#[test]
fn test_anonymous_schemas_are_inlined_not_componentized() {
    let anon = Schema::new(json!({ "type": "object" })).unwrap();
    let mut builder = RegistryBuilder::new();
    builder
        .register(RouteDescriptor::new(Method::GET, "/ping", "ping").response(200, anon, "OK"))
        .unwrap();
    let doc = synthesize(&builder.build(), &info());

    assert!(doc.get("components").is_none());
    assert_eq!(
        doc["paths"]["/ping"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]
            ["type"],
        json!("object")
    );
}

#[test]
fn test_api_doc_caches_identical_document() {
    let doc = ApiDoc::new(Arc::new(user_registry()), info());
    let first = doc.document();
    let second = doc.document();
    // Same cached allocation, not just equal content.
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_api_doc_is_bound_to_its_registry() {
    let out = user_schema();
    let mut builder = RegistryBuilder::new();
    builder
        .register(RouteDescriptor::new(Method::GET, "/pets", "list_pets").response(200, out, "OK"))
        .unwrap();

    let users = ApiDoc::new(Arc::new(user_registry()), info());
    let pets = ApiDoc::new(Arc::new(builder.build()), info());
    assert!(users.document()["paths"]["/users/{id}"].is_object());
    assert!(pets.document()["paths"]["/pets"].is_object());
    assert!(pets.document()["paths"].get("/users/{id}").is_none());
}

//! Loader for proto-style service descriptors written as TOML.
//!
//! ```toml
//! package = "google.example.library.v1"
//!
//! [[services]]
//! name = "LibraryService"
//!
//! [[services.methods]]
//! name = "ListShelves"
//! input = "ListShelvesRequest"
//! output = "ListShelvesResponse"
//! http = { verb = "get", path = "/v1/shelves" }
//!
//! [[messages]]
//! name = "ListShelvesRequest"
//! fields = [
//!     { name = "page_size", type = "int32", number = 1 },
//!     { name = "page_token", type = "string", number = 2 },
//! ]
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    ApiModel, ApiSource, Cardinality, EnumModel, Error, FieldDetail, FieldModel, HttpBinding,
    InterfaceModel, MessageModel, MethodModel, Result, TypeKind, TypeRef,
    api::{is_idempotent_verb, well_known_messages},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Descriptor {
    package: String,
    /// Services exposed by the API; all declared services when absent.
    #[serde(default)]
    apis: Option<Vec<String>>,
    #[serde(default)]
    services: Vec<ServiceDecl>,
    #[serde(default)]
    messages: Vec<MessageDecl>,
    #[serde(default)]
    enums: Vec<EnumDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceDecl {
    name: String,
    #[serde(default)]
    methods: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodDecl {
    name: String,
    input: String,
    output: String,
    #[serde(default)]
    client_streaming: bool,
    #[serde(default)]
    server_streaming: bool,
    #[serde(default)]
    idempotent: Option<bool>,
    #[serde(default)]
    http: Option<HttpDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpDecl {
    verb: String,
    path: String,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessageDecl {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    number: u32,
    #[serde(default)]
    label: Cardinality,
    #[serde(default)]
    oneof: Option<String>,
    #[serde(default)]
    map: Option<MapDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapDecl {
    key: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnumDecl {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

/// Parse a proto descriptor from a string.
pub fn load_proto_str(content: &str, filename: &str) -> Result<ApiModel> {
    let descriptor: Descriptor =
        toml::from_str(content).map_err(|e| Error::toml(e, content, filename))?;
    lower(descriptor)
}

/// Names declared in the descriptor, used to resolve field and method types.
struct Symbols<'a> {
    package: &'a str,
    messages: HashSet<String>,
    enums: HashSet<String>,
}

impl Symbols<'_> {
    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.package, name)
    }

    fn resolve(&self, name: &str, context: &str) -> Result<TypeRef> {
        if let Ok(kind) = name.parse::<TypeKind>() {
            return Ok(TypeRef::scalar(kind));
        }
        let qualified = self.qualify(name);
        for candidate in [qualified.as_str(), name] {
            if self.messages.contains(candidate) {
                return Ok(TypeRef::message(candidate));
            }
            if self.enums.contains(candidate) {
                return Ok(TypeRef::enumeration(candidate));
            }
        }
        Err(Error::unknown_type(name, context))
    }
}

fn lower(descriptor: Descriptor) -> Result<ApiModel> {
    let builtins = well_known_messages(ApiSource::Proto);

    let mut symbols = Symbols {
        package: &descriptor.package,
        messages: builtins.iter().map(|m| m.full_name.clone()).collect(),
        enums: HashSet::new(),
    };
    for message in &descriptor.messages {
        let full_name = symbols.qualify(&message.name);
        if !symbols.messages.insert(full_name.clone()) {
            return Err(Box::new(Error::DuplicateType { name: full_name }));
        }
    }
    for decl in &descriptor.enums {
        let full_name = symbols.qualify(&decl.name);
        if symbols.messages.contains(&full_name) || !symbols.enums.insert(full_name.clone()) {
            return Err(Box::new(Error::DuplicateType { name: full_name }));
        }
    }

    let mut messages: IndexMap<String, MessageModel> = builtins
        .into_iter()
        .map(|m| (m.full_name.clone(), m))
        .collect();
    for decl in &descriptor.messages {
        let message = lower_message(decl, &symbols)?;
        messages.insert(message.full_name.clone(), message);
    }

    let enums = descriptor
        .enums
        .iter()
        .map(|decl| {
            let full_name = symbols.qualify(&decl.name);
            let model = EnumModel {
                name: decl.name.clone(),
                full_name: full_name.clone(),
                values: decl.values.clone(),
            };
            (full_name, model)
        })
        .collect();

    let mut interfaces = Vec::with_capacity(descriptor.services.len());
    for service in &descriptor.services {
        let full_name = symbols.qualify(&service.name);
        let reachable = descriptor
            .apis
            .as_ref()
            .is_none_or(|apis| apis.iter().any(|a| *a == full_name || *a == service.name));
        let methods = service
            .methods
            .iter()
            .map(|m| lower_method(m, &full_name, &symbols))
            .collect::<Result<Vec<_>>>()?;
        debug!(interface = %full_name, methods = methods.len(), "loaded proto service");
        interfaces.push(InterfaceModel {
            name: service.name.clone(),
            full_name,
            reachable,
            methods,
        });
    }

    Ok(ApiModel {
        source: ApiSource::Proto,
        package: descriptor.package.clone(),
        interfaces,
        messages,
        enums,
    })
}

fn lower_message(decl: &MessageDecl, symbols: &Symbols<'_>) -> Result<MessageModel> {
    let full_name = symbols.qualify(&decl.name);
    let mut fields = Vec::with_capacity(decl.fields.len());

    for field in &decl.fields {
        let context = format!("field '{}.{}'", full_name, field.name);
        let type_ref = match (&field.map, &field.ty) {
            (Some(map), _) => {
                let key = symbols.resolve(&map.key, &context)?;
                if !key.is_primitive() {
                    return Err(Box::new(Error::InvalidMapKey {
                        name: map.key.clone(),
                        field: format!("{}.{}", full_name, field.name),
                    }));
                }
                TypeRef::map(key, symbols.resolve(&map.value, &context)?)
            }
            (None, Some(ty)) => symbols.resolve(ty, &context)?.with_cardinality(field.label),
            (None, None) => return Err(Error::unknown_type("<missing>", context)),
        };

        fields.push(FieldModel {
            name: field.name.clone(),
            full_name: format!("{}.{}", full_name, field.name),
            parent: full_name.clone(),
            type_ref,
            oneof: field.oneof.clone(),
            detail: FieldDetail::Proto {
                number: field.number,
            },
        });
    }

    Ok(MessageModel {
        name: decl.name.clone(),
        full_name,
        fields,
    })
}

fn lower_method(decl: &MethodDecl, service: &str, symbols: &Symbols<'_>) -> Result<MethodModel> {
    let full_name = format!("{}.{}", service, decl.name);
    let context = format!("method '{}'", full_name);
    let input = symbols.resolve(&decl.input, &context)?;
    let output = symbols.resolve(&decl.output, &context)?;

    let http = decl.http.as_ref().map(|h| HttpBinding {
        verb: h.verb.to_ascii_lowercase(),
        path: h.path.clone(),
        body: h.body.clone(),
    });
    let idempotent = decl
        .idempotent
        .unwrap_or_else(|| http.as_ref().is_some_and(|h| is_idempotent_verb(&h.verb)));

    Ok(MethodModel {
        name: decl.name.clone(),
        full_name,
        raw_name: decl.name.clone(),
        input,
        output,
        request_streaming: decl.client_streaming,
        response_streaming: decl.server_streaming,
        idempotent,
        http,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
        package = "google.example.library.v1"

        [[services]]
        name = "LibraryService"

        [[services.methods]]
        name = "GetShelf"
        input = "GetShelfRequest"
        output = "Shelf"
        http = { verb = "GET", path = "/v1/{name=shelves/*}" }

        [[services.methods]]
        name = "DeleteShelf"
        input = "GetShelfRequest"
        output = "google.protobuf.Empty"
        idempotent = false

        [[messages]]
        name = "Shelf"
        fields = [
            { name = "name", type = "string", number = 1 },
            { name = "labels", number = 2, map = { key = "string", value = "string" } },
            { name = "kind", type = "Kind", number = 3 },
        ]

        [[messages]]
        name = "GetShelfRequest"
        fields = [{ name = "name", type = "string", number = 1 }]

        [[enums]]
        name = "Kind"
        values = ["KIND_UNSPECIFIED", "FICTION"]
    "#;

    #[test]
    fn test_load_library() {
        let model = load_proto_str(LIBRARY, "library.toml").expect("descriptor should load");
        assert_eq!(model.source, ApiSource::Proto);

        let service = model
            .interface("google.example.library.v1.LibraryService")
            .expect("service should exist");
        assert!(service.reachable);

        let get = service.method("GetShelf").unwrap();
        assert!(get.idempotent);
        assert_eq!(get.output.type_name.as_deref(), Some("google.example.library.v1.Shelf"));

        let delete = service.method("DeleteShelf").unwrap();
        assert!(!delete.idempotent);
        assert!(model.is_empty_type(&delete.output));

        let shelf = model.message("google.example.library.v1.Shelf").unwrap();
        assert!(shelf.field("labels").unwrap().is_map());
        assert!(shelf.field("kind").unwrap().is_enum());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = load_proto_str(
            r#"
            package = "pkg"
            [[messages]]
            name = "A"
            fields = [{ name = "b", type = "Missing", number = 1 }]
            "#,
            "bad.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownType { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_apis_limit_reachability() {
        let model = load_proto_str(
            r#"
            package = "pkg"
            apis = ["pkg.Public"]
            [[services]]
            name = "Public"
            [[services]]
            name = "Hidden"
            "#,
            "apis.toml",
        )
        .unwrap();
        assert!(model.interface("pkg.Public").unwrap().reachable);
        assert!(!model.interface("pkg.Hidden").unwrap().reachable);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = load_proto_str("package = ", "broken.toml").unwrap_err();
        assert!(matches!(*err, Error::Toml { .. }));
    }
}

//! Loader for discovery documents (JSON).
//!
//! Only the parts of the document the generator reads are modelled: schemas,
//! resources with their methods, and method parameters.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;
use veneer_core::Name;

use crate::{
    ApiModel, ApiSource, DiscoverySchema, Error, FieldDetail, FieldModel, HttpBinding,
    InterfaceModel, MessageModel, MethodModel, Result, TypeKind, TypeRef,
    api::{EMPTY_TYPE, is_idempotent_verb, well_known_messages},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    name: String,
    version: String,
    #[serde(default)]
    schemas: IndexMap<String, Schema>,
    #[serde(default)]
    resources: IndexMap<String, Resource>,
    #[serde(default)]
    methods: IndexMap<String, Method>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Schema {
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(rename = "$ref", default)]
    reference: Option<String>,
    #[serde(default)]
    properties: IndexMap<String, Schema>,
    #[serde(default)]
    items: Option<Box<Schema>>,
    #[serde(default)]
    additional_properties: Option<Box<Schema>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Resource {
    #[serde(default)]
    methods: IndexMap<String, Method>,
    #[serde(default)]
    resources: IndexMap<String, Resource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Method {
    id: String,
    path: String,
    #[serde(default)]
    flat_path: Option<String>,
    http_method: String,
    #[serde(default)]
    parameters: IndexMap<String, Schema>,
    #[serde(default)]
    parameter_order: Vec<String>,
    #[serde(default)]
    request: Option<SchemaRef>,
    #[serde(default)]
    response: Option<SchemaRef>,
}

#[derive(Debug, Deserialize)]
struct SchemaRef {
    #[serde(rename = "$ref")]
    reference: String,
}

/// Parse a discovery document from a string.
pub fn load_discovery_str(content: &str, filename: &str) -> Result<ApiModel> {
    let document: Document =
        serde_json::from_str(content).map_err(|e| Error::json(e, content, filename))?;
    Lowering::new(&document).lower(&document)
}

struct Lowering {
    package: String,
    messages: IndexMap<String, MessageModel>,
}

impl Lowering {
    fn new(document: &Document) -> Self {
        let messages = well_known_messages(ApiSource::Discovery)
            .into_iter()
            .map(|m| (m.full_name.clone(), m))
            .collect();
        Self {
            package: format!("{}.{}", document.name, document.version),
            messages,
        }
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.package, name)
    }

    fn lower(mut self, document: &Document) -> Result<ApiModel> {
        // Register every top-level schema before lowering so $refs resolve in any order.
        for name in document.schemas.keys() {
            let full_name = self.qualify(name);
            self.messages.insert(
                full_name.clone(),
                MessageModel {
                    name: name.clone(),
                    full_name,
                    fields: Vec::new(),
                },
            );
        }
        for (name, schema) in &document.schemas {
            let full_name = self.qualify(name);
            let fields = self.lower_properties(&full_name, schema)?;
            if let Some(message) = self.messages.get_mut(&full_name) {
                message.fields = fields;
            }
        }

        let mut interfaces = Vec::new();
        if !document.methods.is_empty() {
            let name = Name::from(document.name.as_str()).to_upper_camel();
            interfaces.push(self.lower_interface(&name, &document.methods)?);
        }
        for (name, resource) in &document.resources {
            self.lower_resource_tree(&Name::from(name.as_str()), resource, &mut interfaces)?;
        }

        Ok(ApiModel {
            source: ApiSource::Discovery,
            package: self.package,
            interfaces,
            messages: self.messages,
            enums: IndexMap::new(),
        })
    }

    fn lower_resource_tree(
        &mut self,
        path: &Name,
        resource: &Resource,
        interfaces: &mut Vec<InterfaceModel>,
    ) -> Result<()> {
        if !resource.methods.is_empty() {
            interfaces.push(self.lower_interface(&path.to_upper_camel(), &resource.methods)?);
        }
        for (name, child) in &resource.resources {
            self.lower_resource_tree(&path.join(name.as_str()), child, interfaces)?;
        }
        Ok(())
    }

    fn lower_interface(
        &mut self,
        name: &str,
        methods: &IndexMap<String, Method>,
    ) -> Result<InterfaceModel> {
        let full_name = self.qualify(name);
        let methods = methods
            .iter()
            .map(|(key, method)| self.lower_method(name, key, method))
            .collect::<Result<Vec<_>>>()?;
        debug!(interface = %full_name, methods = methods.len(), "loaded discovery resource");
        Ok(InterfaceModel {
            name: name.to_string(),
            full_name,
            reachable: true,
            methods,
        })
    }

    fn lower_method(&mut self, resource: &str, key: &str, method: &Method) -> Result<MethodModel> {
        let simple_name = Name::from(key).to_upper_camel();
        let request_name = format!("{}{}HttpRequest", simple_name, resource);
        let request_full_name = self.qualify(&request_name);

        let mut ordered: Vec<&String> = method.parameter_order.iter().collect();
        ordered.extend(
            method
                .parameters
                .keys()
                .filter(|k| !method.parameter_order.contains(k)),
        );

        let mut fields = Vec::with_capacity(ordered.len() + 1);
        for param in ordered {
            let Some(schema) = method.parameters.get(param) else {
                return Err(Error::unknown_type(
                    param.as_str(),
                    format!("parameterOrder of '{}'", method.id),
                ));
            };
            let type_ref = self.schema_type(&request_full_name, param, schema)?;
            fields.push(self.field(&request_full_name, param, type_ref, schema));
        }
        if let Some(request) = &method.request {
            let body = format!("{}Resource", Name::from(request.reference.as_str()).to_lower_camel());
            let type_ref = self.reference(&request.reference, &method.id)?;
            fields.push(self.field(&request_full_name, &body, type_ref, &Schema::default()));
        }
        self.messages.insert(
            request_full_name.clone(),
            MessageModel {
                name: request_name,
                full_name: request_full_name.clone(),
                fields,
            },
        );

        let output = match &method.response {
            Some(response) => self.reference(&response.reference, &method.id)?,
            None => TypeRef::message(EMPTY_TYPE),
        };

        Ok(MethodModel {
            name: simple_name,
            full_name: method.id.clone(),
            raw_name: key.to_string(),
            input: TypeRef::message(request_full_name),
            output,
            request_streaming: false,
            response_streaming: false,
            idempotent: is_idempotent_verb(&method.http_method),
            http: Some(HttpBinding {
                verb: method.http_method.to_ascii_lowercase(),
                path: method.flat_path.clone().unwrap_or_else(|| method.path.clone()),
                body: method.request.as_ref().map(|_| "*".to_string()),
            }),
        })
    }

    fn lower_properties(&mut self, owner: &str, schema: &Schema) -> Result<Vec<FieldModel>> {
        let mut fields = Vec::with_capacity(schema.properties.len());
        for (name, property) in &schema.properties {
            let type_ref = self.schema_type(owner, name, property)?;
            fields.push(self.field(owner, name, type_ref, property));
        }
        Ok(fields)
    }

    fn field(&self, owner: &str, name: &str, type_ref: TypeRef, schema: &Schema) -> FieldModel {
        FieldModel {
            name: name.to_string(),
            full_name: format!("{}.{}", owner, name),
            parent: owner.to_string(),
            type_ref,
            oneof: None,
            detail: FieldDetail::Discovery(DiscoverySchema {
                location: schema.location.clone(),
                required: schema.required,
                format: schema.format.clone(),
                description: schema.description.clone(),
                pattern: schema.pattern.clone(),
            }),
        }
    }

    fn reference(&self, reference: &str, context: &str) -> Result<TypeRef> {
        let full_name = self.qualify(reference);
        if self.messages.contains_key(&full_name) {
            Ok(TypeRef::message(full_name))
        } else {
            Err(Error::unknown_type(reference, format!("'{}'", context)))
        }
    }

    fn schema_type(&mut self, owner: &str, property: &str, schema: &Schema) -> Result<TypeRef> {
        if let Some(reference) = &schema.reference {
            return self.reference(reference, &format!("{}.{}", owner, property));
        }

        let type_ref = match schema.ty.as_deref() {
            Some("array") => match &schema.items {
                Some(items) => self.schema_type(owner, property, items)?.repeated(),
                None => TypeRef::scalar(TypeKind::String).repeated(),
            },
            Some("object") => {
                if let Some(values) = &schema.additional_properties {
                    let value = self.schema_type(owner, property, values)?;
                    TypeRef::map(TypeRef::scalar(TypeKind::String), value)
                } else if !schema.properties.is_empty() {
                    self.nested_message(owner, property, schema)?
                } else {
                    TypeRef::scalar(TypeKind::String)
                }
            }
            Some("string") => TypeRef::scalar(match schema.format.as_deref() {
                Some("int64") => TypeKind::Int64,
                Some("uint64") => TypeKind::Uint64,
                Some("byte") => TypeKind::Bytes,
                _ => TypeKind::String,
            }),
            Some("integer") => TypeRef::scalar(match schema.format.as_deref() {
                Some("uint32") => TypeKind::Uint32,
                _ => TypeKind::Int32,
            }),
            Some("number") => TypeRef::scalar(match schema.format.as_deref() {
                Some("float") => TypeKind::Float,
                _ => TypeKind::Double,
            }),
            Some("boolean") => TypeRef::scalar(TypeKind::Bool),
            _ => TypeRef::scalar(TypeKind::String),
        };
        Ok(type_ref)
    }

    fn nested_message(&mut self, owner: &str, property: &str, schema: &Schema) -> Result<TypeRef> {
        let name = Name::from(property).to_upper_camel();
        let full_name = format!("{}.{}", owner, name);
        let fields = self.lower_properties(&full_name, schema)?;
        self.messages.insert(
            full_name.clone(),
            MessageModel {
                name,
                full_name: full_name.clone(),
                fields,
            },
        );
        Ok(TypeRef::message(full_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESSES: &str = r#"{
        "name": "compute",
        "version": "v1",
        "schemas": {
            "Address": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "labels": { "type": "object", "additionalProperties": { "type": "string" } },
                    "id": { "type": "string", "format": "uint64" }
                }
            },
            "AddressList": {
                "type": "object",
                "properties": {
                    "items": { "type": "array", "items": { "$ref": "Address" } },
                    "nextPageToken": { "type": "string" }
                }
            }
        },
        "resources": {
            "addresses": {
                "methods": {
                    "list": {
                        "id": "compute.addresses.list",
                        "path": "{project}/regions/{region}/addresses",
                        "httpMethod": "GET",
                        "parameters": {
                            "maxResults": { "type": "integer", "format": "uint32", "location": "query" },
                            "pageToken": { "type": "string", "location": "query" },
                            "project": { "type": "string", "required": true, "location": "path" },
                            "region": { "type": "string", "required": true, "location": "path" }
                        },
                        "parameterOrder": ["project", "region"],
                        "response": { "$ref": "AddressList" }
                    },
                    "insert": {
                        "id": "compute.addresses.insert",
                        "path": "{project}/regions/{region}/addresses",
                        "httpMethod": "POST",
                        "parameters": {
                            "project": { "type": "string", "required": true, "location": "path" },
                            "region": { "type": "string", "required": true, "location": "path" }
                        },
                        "parameterOrder": ["project", "region"],
                        "request": { "$ref": "Address" }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_load_addresses() {
        let model = load_discovery_str(ADDRESSES, "compute.json").expect("document should load");
        assert_eq!(model.source, ApiSource::Discovery);
        assert_eq!(model.package, "compute.v1");

        let addresses = model.interface("compute.v1.Addresses").expect("resource interface");
        let list = addresses.method("List").unwrap();
        assert!(list.idempotent);
        assert_eq!(list.full_name, "compute.addresses.list");

        let names: Vec<&str> = model
            .input_fields(list)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["project", "region", "maxResults", "pageToken"]);

        let insert = addresses.method("Insert").unwrap();
        assert!(!insert.idempotent);
        assert!(model.is_empty_type(&insert.output));
        let body = model.input_fields(insert).last().unwrap();
        assert_eq!(body.name, "addressResource");
        assert!(body.is_message());
    }

    #[test]
    fn test_schema_types() {
        let model = load_discovery_str(ADDRESSES, "compute.json").unwrap();
        let address = model.message("compute.v1.Address").unwrap();
        assert!(address.field("labels").unwrap().is_map());
        assert_eq!(address.field("id").unwrap().type_ref.kind, TypeKind::Uint64);

        let list = model.message("compute.v1.AddressList").unwrap();
        let items = list.field("items").unwrap();
        assert!(items.is_repeated() && items.is_message());

        let schema = items.discovery_schema().unwrap();
        assert!(!schema.required);
        assert!(items.proto_number().is_err());
    }

    #[test]
    fn test_unknown_ref_is_rejected() {
        let err = load_discovery_str(
            r#"{ "name": "x", "version": "v1",
                 "schemas": { "A": { "type": "object", "properties": { "b": { "$ref": "Missing" } } } } }"#,
            "x.json",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownType { .. }));
    }
}

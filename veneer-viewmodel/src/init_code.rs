//! Initialization statements for sample requests.

use serde::Serialize;

/// A dependency-ordered list of statements that build one request object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InitCodeView {
    /// Statements in initialization order; the request itself comes last.
    pub lines: Vec<InitCodeLineView>,
    /// The request's own fields, for calls that pass them as arguments.
    pub top_level_fields: Vec<FieldSettingView>,
    /// Variable holding the finished request.
    pub request_identifier: String,
}

impl InitCodeView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "line_type", rename_all = "snake_case")]
pub enum InitCodeLineView {
    Simple(SimpleInitCodeLineView),
    Structure(StructureInitCodeLineView),
    List(ListInitCodeLineView),
    Map(MapInitCodeLineView),
}

impl InitCodeLineView {
    pub fn identifier(&self) -> &str {
        match self {
            InitCodeLineView::Simple(line) => &line.identifier,
            InitCodeLineView::Structure(line) => &line.identifier,
            InitCodeLineView::List(line) => &line.identifier,
            InitCodeLineView::Map(line) => &line.identifier,
        }
    }
}

/// `Type identifier = value;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleInitCodeLineView {
    pub type_name: String,
    pub identifier: String,
    pub value: InitValueView,
}

/// A message built from previously initialized fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureInitCodeLineView {
    pub type_name: String,
    pub identifier: String,
    pub field_settings: Vec<FieldSettingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListInitCodeLineView {
    pub type_name: String,
    pub element_type_name: String,
    pub identifier: String,
    pub element_identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInitCodeLineView {
    pub type_name: String,
    pub key_type_name: String,
    pub value_type_name: String,
    pub identifier: String,
    pub entries: Vec<MapEntryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntryView {
    pub key: String,
    /// Variable holding the value.
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSettingView {
    /// Field name as written in the target language.
    pub field_name: String,
    /// Setter or builder method for the field.
    pub setter: String,
    pub type_name: String,
    /// Variable holding the value assigned to the field.
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitValueView {
    /// A validated literal, already normalized.
    Literal { value: String },
    /// A formatted resource name.
    ResourceName {
        entity_name: String,
        path_template: String,
    },
    /// The type's default value.
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_serializes_with_tag() {
        let line = InitCodeLineView::Simple(SimpleInitCodeLineView {
            type_name: "String".into(),
            identifier: "name".into(),
            value: InitValueView::Literal {
                value: "shelves/1".into(),
            },
        });
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["line_type"], "simple");
        assert_eq!(json["value"]["kind"], "literal");
        assert_eq!(line.identifier(), "name");
    }
}

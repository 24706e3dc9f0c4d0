//! Sample output statements after type checking.

use serde::Serialize;

use crate::InitCodeView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleView {
    pub id: String,
    pub init_code: InitCodeView,
    pub outputs: Vec<OutputView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputView {
    Print(PrintView),
    Define(DefineView),
    Comment(CommentView),
    ArrayLoop(ArrayLoopView),
    MapLoop(MapLoopView),
    WriteFile(WriteFileView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintView {
    pub format: StringFormatView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefineView {
    pub variable_type_name: String,
    pub variable_name: String,
    pub reference: VariableView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLoopView {
    pub variable_type_name: String,
    pub variable_name: String,
    pub collection: VariableView,
    pub body: Vec<OutputView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLoopView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_variable_name: Option<String>,
    pub key_type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_variable_name: Option<String>,
    pub value_type_name: String,
    pub map: VariableView,
    pub body: Vec<OutputView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteFileView {
    pub file_name: StringFormatView,
    pub contents: VariableView,
    /// Whether this is the first file written by the sample.
    pub is_first: bool,
}

/// A format string with its already-rendered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringFormatView {
    pub format: String,
    pub args: Vec<String>,
}

/// A value reached from a variable through a chain of accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableView {
    pub variable: String,
    pub accessors: Vec<String>,
    pub type_name: String,
}

impl VariableView {
    /// The full expression, e.g. `response.getShelf().getName()`.
    pub fn expression(&self) -> String {
        let mut expr = self.variable.clone();
        for accessor in &self.accessors {
            expr.push_str(accessor);
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_expression() {
        let var = VariableView {
            variable: "response".into(),
            accessors: vec![".getShelf()".into(), ".getName()".into()],
            type_name: "String".into(),
        };
        assert_eq!(var.expression(), "response.getShelf().getName()");
    }

    #[test]
    fn test_output_kind_tag() {
        let view = OutputView::Comment(CommentView {
            lines: vec!["a".into()],
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "comment");
    }
}

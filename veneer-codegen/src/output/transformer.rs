//! Type-checks sample output statements and turns them into views.

use veneer_config::{LoopStatement, OutputSpec, WriteFileStatement};
use veneer_model::{ApiModel, MethodModel, TypeKind, TypeRef};
use veneer_viewmodel::{
    ArrayLoopView, CommentView, DefineView, MapLoopView, OutputView, PrintView, StringFormatView,
    VariableView, WriteFileView,
};

use super::{
    scanner::{Scanner, Token},
    scope::{LocalVariable, ScopeId, ScopeTable},
};
use crate::{Error, Result, initcode::validate_value, language::NamingConvention, resolve::MethodConfig};

/// The accessor base that stands for the method's response.
pub const RESPONSE_PLACEHOLDER: &str = "$resp";

const RESPONSE_VARIABLE: &str = "response";

/// The type `$resp` refers to.
///
/// Paged methods yield one resource at a time and long-running methods
/// yield the operation's result.
pub fn response_type(method: &MethodModel, config: &MethodConfig) -> TypeRef {
    if let Some(paging) = &config.page_streaming {
        paging.resources_element.clone()
    } else if let Some(long_running) = &config.long_running {
        long_running.return_type.clone()
    } else {
        method.output.clone()
    }
}

/// Print the whole response, unless there is nothing to print.
pub fn default_output_specs(model: &ApiModel, method: &MethodModel, config: &MethodConfig) -> Vec<OutputSpec> {
    if model.is_empty_type(&method.output) {
        return Vec::new();
    }
    if let Some(long_running) = &config.long_running
        && model.is_empty_type(&long_running.return_type)
    {
        return Vec::new();
    }
    vec![OutputSpec {
        print: vec!["%s".to_string(), RESPONSE_PLACEHOLDER.to_string()],
        ..Default::default()
    }]
}

/// A resolved accessor and the type it evaluates to.
struct Accessed {
    view: VariableView,
    type_ref: TypeRef,
}

/// Output-spec interpreter for one sample.
pub struct OutputTransformer<'a> {
    model: &'a ApiModel,
    naming: &'a NamingConvention,
    method: &'a str,
    sample: &'a str,
    response_type: TypeRef,
    scopes: ScopeTable,
    files_written: usize,
}

impl<'a> OutputTransformer<'a> {
    pub fn new(
        model: &'a ApiModel,
        naming: &'a NamingConvention,
        method: &'a MethodModel,
        config: &MethodConfig,
        sample: &'a str,
    ) -> Self {
        Self {
            model,
            naming,
            method: &method.name,
            sample,
            response_type: response_type(method, config),
            scopes: ScopeTable::new(),
            files_written: 0,
        }
    }

    /// Interpret the sample's statements in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputSpec`] for the first malformed statement.
    pub fn transform(mut self, specs: &[OutputSpec]) -> Result<Vec<OutputView>> {
        let root = self.scopes.root();
        specs.iter().map(|spec| self.to_view(spec, root)).collect()
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::OutputSpec {
            method: self.method.to_string(),
            sample: self.sample.to_string(),
            message: message.into(),
        }
    }

    fn to_view(&mut self, spec: &OutputSpec, scope: ScopeId) -> Result<OutputView> {
        let set = [
            spec.loop_statement.is_some(),
            !spec.print.is_empty(),
            !spec.define.is_empty(),
            !spec.comment.is_empty(),
            spec.write_file.is_some(),
        ]
        .into_iter()
        .filter(|is_set| *is_set)
        .count();
        if set > 1 {
            return Err(self.error("only one field of OutputSpec may be set"));
        }

        if let Some(loop_statement) = &spec.loop_statement {
            self.loop_view(loop_statement, scope)
        } else if !spec.print.is_empty() {
            self.print_view(&spec.print, scope)
        } else if !spec.define.is_empty() {
            self.define_view(&spec.define, scope)
        } else if !spec.comment.is_empty() {
            Ok(self.comment_view(&spec.comment))
        } else if let Some(write_file) = &spec.write_file {
            self.write_file_view(write_file, scope)
        } else {
            Err(self.error("one field of OutputSpec must be set"))
        }
    }

    fn print_view(&mut self, print: &[String], scope: ScopeId) -> Result<OutputView> {
        if print.is_empty() {
            return Err(self.error("print spec cannot be empty"));
        }
        let format = self.string_format(print, scope)?;
        Ok(OutputView::Print(PrintView { format }))
    }

    fn string_format(&mut self, parts: &[String], scope: ScopeId) -> Result<StringFormatView> {
        let Some((format, paths)) = parts.split_first() else {
            return Err(self.error("format string cannot be empty"));
        };
        let args = paths
            .iter()
            .map(|path| {
                let accessed = self.accessor(&mut Scanner::new(path), scope, None, false)?;
                Ok(accessed.view.expression())
            })
            .collect::<Result<Vec<_>>>()?;
        let (format, args) = self.naming.interpolate(format, args);
        Ok(StringFormatView { format, args })
    }

    fn write_file_view(&mut self, write_file: &WriteFileStatement, scope: ScopeId) -> Result<OutputView> {
        let file_name = self.string_format(&write_file.file_name, scope)?;
        let contents = self.accessor(&mut Scanner::new(&write_file.contents), scope, None, false)?;
        if !contents.type_ref.is_string_or_bytes() || contents.type_ref.is_repeated() {
            return Err(self.error(format!(
                "Output to file: expected string or bytes, found {}",
                contents.type_ref
            )));
        }
        let is_first = self.files_written == 0;
        self.files_written += 1;
        Ok(OutputView::WriteFile(WriteFileView {
            file_name,
            contents: contents.view,
            is_first,
        }))
    }

    fn loop_view(&mut self, statement: &LoopStatement, scope: ScopeId) -> Result<OutputView> {
        let child = self.scopes.new_child(scope);
        match (statement.collection.is_empty(), statement.map.is_empty()) {
            (false, true) => {
                if statement.variable.is_empty() {
                    return Err(self.error(
                        "Bad format: `variable` must be specified if `collection` is specified.",
                    ));
                }
                if !statement.key.is_empty() || !statement.value.is_empty() {
                    return Err(self.error(
                        "Bad format: neither `key` nor `value` can be specified if `collection` is specified.",
                    ));
                }
                self.array_loop_view(statement, child)
            }
            (true, false) => {
                if !statement.variable.is_empty() {
                    return Err(
                        self.error("Bad format: `variable` can't be specified if `map` is specified.")
                    );
                }
                if statement.key.is_empty() && statement.value.is_empty() {
                    return Err(self.error(
                        "Bad format: at least one of `key` and `value` must be specified if `map` is specified.",
                    ));
                }
                self.map_loop_view(statement, child)
            }
            _ => Err(self.error(
                "Bad format: exactly one of `map` and `collection` should be specified in `loop`.",
            )),
        }
    }

    fn array_loop_view(&mut self, statement: &LoopStatement, scope: ScopeId) -> Result<OutputView> {
        let variable = statement.variable.as_str();
        self.assert_not_template_name(variable)?;
        let collection =
            self.accessor(&mut Scanner::new(&statement.collection), scope, Some(variable), true)?;
        let variable_type_name = self.declared_type_name(scope, variable);
        let body = self.body(&statement.body, scope)?;
        Ok(OutputView::ArrayLoop(ArrayLoopView {
            variable_type_name,
            variable_name: self.naming.local_var_name(variable),
            collection: collection.view,
            body,
        }))
    }

    fn map_loop_view(&mut self, statement: &LoopStatement, scope: ScopeId) -> Result<OutputView> {
        let map = self.accessor(&mut Scanner::new(&statement.map), scope, None, false)?;
        let (Some(key_type), Some(value_type)) = (map.type_ref.map_key(), map.type_ref.map_value())
        else {
            return Err(self.error(format!("{} is not a map field", statement.map)));
        };
        let (key_type, value_type) = (key_type.clone(), value_type.clone());
        let key_type_name = self.naming.type_name_for(&key_type);
        let value_type_name = self.naming.type_name_for(&value_type);

        let key_variable_name = self.declare_loop_variable(scope, &statement.key, &key_type, &key_type_name)?;
        let value_variable_name =
            self.declare_loop_variable(scope, &statement.value, &value_type, &value_type_name)?;

        let body = self.body(&statement.body, scope)?;
        Ok(OutputView::MapLoop(MapLoopView {
            key_variable_name,
            key_type_name,
            value_variable_name,
            value_type_name,
            map: map.view,
            body,
        }))
    }

    /// Declare a map loop key or value; an empty name declares nothing.
    fn declare_loop_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_ref: &TypeRef,
        type_name: &str,
    ) -> Result<Option<String>> {
        if name.is_empty() {
            return Ok(None);
        }
        self.assert_not_template_name(name)?;
        self.declare(scope, name, type_ref.clone(), type_name.to_string())?;
        Ok(Some(self.naming.local_var_name(name)))
    }

    fn body(&mut self, body: &[OutputSpec], scope: ScopeId) -> Result<Vec<OutputView>> {
        body.iter().map(|spec| self.to_view(spec, scope)).collect()
    }

    fn define_view(&mut self, definition: &str, scope: ScopeId) -> Result<OutputView> {
        let mut scanner = Scanner::new(definition);
        if scanner.scan() != Token::Ident {
            return Err(self.error(format!("expected identifier: {}", definition)));
        }
        let identifier = scanner.token_str().to_string();
        self.assert_not_template_name(&identifier)?;
        if scanner.scan() != Token::Char('=') {
            return Err(self.error(format!("invalid definition, expecting '=': {}", definition)));
        }
        let reference = self.accessor(&mut scanner, scope, Some(&identifier), false)?;
        Ok(OutputView::Define(DefineView {
            variable_type_name: self.declared_type_name(scope, &identifier),
            variable_name: self.naming.local_var_name(&identifier),
            reference: reference.view,
        }))
    }

    fn comment_view(&self, comment: &[String]) -> OutputView {
        let (format, args) = comment.split_first().map_or(("", &[][..]), |(f, a)| (f.as_str(), a));
        let mut args = args.iter().map(|arg| self.naming.local_var_name(arg));
        let mut text = String::new();
        let mut rest = format;
        while let Some(pos) = rest.find("%s") {
            text.push_str(&rest[..pos]);
            if let Some(arg) = args.next() {
                text.push_str(&arg);
            }
            rest = &rest[pos + 2..];
        }
        text.push_str(rest);
        OutputView::Comment(CommentView {
            lines: text.split('\n').map(str::to_string).collect(),
        })
    }

    /// Resolve an accessor expression, optionally declaring a variable for its value.
    ///
    /// ```text
    /// accessor := IDENT
    ///           | accessor '.' IDENT
    ///           | accessor '[' INT ']'
    ///           | accessor '{' (STRING | INT | IDENT) '}'
    /// ```
    ///
    /// With `element_of_collection` the expression must be a list and the
    /// new variable gets the element type.
    fn accessor(
        &mut self,
        scanner: &mut Scanner<'_>,
        scope: ScopeId,
        new_variable: Option<&str>,
        element_of_collection: bool,
    ) -> Result<Accessed> {
        let input = scanner.input();
        if scanner.scan() != Token::Ident {
            return Err(self.error(format!("expected identifier: {}", input)));
        }
        let base = scanner.token_str().to_string();

        let (variable, mut type_ref) = if base == RESPONSE_PLACEHOLDER {
            (
                self.naming.local_var_name(RESPONSE_VARIABLE),
                self.response_type.clone(),
            )
        } else {
            let local = self
                .scopes
                .lookup(scope, &base)
                .ok_or_else(|| self.error(format!("variable not defined: {}", base)))?;
            (self.naming.local_var_name(&base), local.type_ref.clone())
        };

        let mut accessors = Vec::new();
        loop {
            match scanner.scan() {
                Token::Eof => break,
                Token::Char('.') => {
                    if !type_ref.is_message() {
                        return Err(self.error(format!("{} is not a message", input)));
                    }
                    if type_ref.is_repeated() || type_ref.is_map() {
                        return Err(self.error(format!("{} is not scalar", input)));
                    }
                    if scanner.scan() != Token::Ident {
                        return Err(self.error(format!("expected identifier: {}", input)));
                    }
                    let field_name = scanner.token_str();
                    let field = self.model.field_of(&type_ref, field_name).ok_or_else(|| {
                        self.error(format!("type {} does not have field {}", type_ref, field_name))
                    })?;
                    accessors.push(self.naming.field_accessor(&field.name));
                    type_ref = field.type_ref.clone();
                }
                Token::Char('[') => {
                    if !type_ref.is_repeated() || type_ref.is_map() {
                        return Err(self.error(format!("{} is not a repeated field", input)));
                    }
                    let index = match scanner.scan() {
                        Token::Int => scanner.token_str().parse::<usize>().ok(),
                        _ => None,
                    }
                    .ok_or_else(|| self.error(format!("expected int in index expression: {}", input)))?;
                    accessors.push(self.naming.index_accessor(index));
                    type_ref = type_ref.make_optional();
                    self.expect(scanner, ']')?;
                }
                Token::Char('{') => {
                    let (Some(key_type), Some(value_type)) = (type_ref.map_key(), type_ref.map_value())
                    else {
                        return Err(self.error(format!("{} is not a map field", input)));
                    };
                    let key_token = scanner.scan();
                    let key = scanner.token_str().to_string();
                    self.check_map_key(key_type, key_token, &key, input)?;
                    accessors.push(self.naming.map_key_accessor(key_type, &key));
                    type_ref = value_type.clone();
                    self.expect(scanner, '}')?;
                }
                Token::Char(c) => {
                    return Err(self.error(format!("unexpected character: {} ({})", c, c as u32)));
                }
                Token::Ident | Token::Int | Token::Str => {
                    return Err(self.error(format!(
                        "unexpected token '{}' in {}",
                        scanner.token_str(),
                        input
                    )));
                }
            }
        }

        if let Some(name) = new_variable {
            self.assert_not_template_name(name)?;
            if element_of_collection {
                if !type_ref.is_repeated() || type_ref.is_map() {
                    return Err(self.error(format!("{} is not a repeated field", input)));
                }
                let element = type_ref.make_optional();
                let type_name = self.naming.type_name_for(&element);
                self.declare(scope, name, element, type_name)?;
            } else {
                let type_name = self.naming.type_name_for(&type_ref);
                self.declare(scope, name, type_ref.clone(), type_name)?;
            }
        }

        Ok(Accessed {
            view: VariableView {
                variable,
                accessors,
                type_name: self.naming.type_name_for(&type_ref),
            },
            type_ref,
        })
    }

    fn check_map_key(&self, key_type: &TypeRef, token: Token, key: &str, input: &str) -> Result<()> {
        let (expected, what) = match key_type.kind {
            TypeKind::String => (Token::Str, "string"),
            TypeKind::Bool => (Token::Ident, "boolean"),
            _ => (Token::Int, "integral"),
        };
        if token != expected {
            return Err(self.error(format!("expected {} type for map key: {}", what, input)));
        }
        let literal = if expected == Token::Str {
            format!("\"{}\"", key)
        } else {
            key.to_string()
        };
        validate_value(key_type, &literal)
            .map(|_| ())
            .map_err(|e| self.error(e.to_string()))
    }

    fn expect(&self, scanner: &mut Scanner<'_>, close: char) -> Result<()> {
        if scanner.scan() == Token::Char(close) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}': {}", close, scanner.input())))
        }
    }

    fn declare(&mut self, scope: ScopeId, name: &str, type_ref: TypeRef, type_name: String) -> Result<()> {
        if self.scopes.put(scope, name, LocalVariable { type_ref, type_name }) {
            Ok(())
        } else {
            Err(self.error(format!("duplicate variable declaration not allowed: {}", name)))
        }
    }

    fn declared_type_name(&self, scope: ScopeId, name: &str) -> String {
        self.scopes
            .lookup(scope, name)
            .map(|v| v.type_name.clone())
            .unwrap_or_default()
    }

    fn assert_not_template_name(&self, name: &str) -> Result<()> {
        if self.naming.is_sample_template_name(name) {
            return Err(self.error(format!(
                "cannot define variable \"{}\": it is used by the sample template",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use veneer_config::Language;

    use super::*;
    use crate::{
        language::{JAVA_NAMING, PYTHON_NAMING},
        resolve::{ResolveOptions, resolve},
        testing::{LIBRARY_SERVICE, library_config, library_model},
    };

    fn resolved_method(model: &ApiModel, name: &str) -> MethodConfig {
        let options = ResolveOptions::new(Language::Java, model);
        let resolved = resolve(model, &library_config(), &options, &Default::default()).unwrap();
        resolved.config.interfaces[LIBRARY_SERVICE]
            .method(name)
            .cloned()
            .unwrap()
    }

    fn parse_specs(yaml: &str) -> Vec<OutputSpec> {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn transform(method: &str, yaml: &str) -> Result<Vec<OutputView>> {
        let model = library_model();
        let config = resolved_method(&model, method);
        let method = model.interface(LIBRARY_SERVICE).unwrap().method(method).unwrap();
        OutputTransformer::new(&model, &JAVA_NAMING, method, &config, "sample").transform(&parse_specs(yaml))
    }

    fn message(result: Result<Vec<OutputView>>) -> String {
        match result.unwrap_err() {
            Error::OutputSpec { message, .. } => message,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_specs() {
        let model = library_model();
        let interface = model.interface(LIBRARY_SERVICE).unwrap();

        let get = interface.method("GetShelf").unwrap();
        let specs = default_output_specs(&model, get, &resolved_method(&model, "GetShelf"));
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].print, vec!["%s", "$resp"]);

        let delete = interface.method("DeleteShelf").unwrap();
        assert!(default_output_specs(&model, delete, &resolved_method(&model, "DeleteShelf")).is_empty());
    }

    #[test]
    fn test_response_type_per_method_kind() {
        let model = library_model();
        let interface = model.interface(LIBRARY_SERVICE).unwrap();

        let list = interface.method("ListBooks").unwrap();
        let paged = response_type(list, &resolved_method(&model, "ListBooks"));
        assert_eq!(paged.type_name.as_deref(), Some("google.example.library.v1.Book"));
        assert!(!paged.is_repeated());

        let archive = interface.method("ArchiveBooks").unwrap();
        let lro = response_type(archive, &resolved_method(&model, "ArchiveBooks"));
        assert_eq!(
            lro.type_name.as_deref(),
            Some("google.example.library.v1.ArchiveBooksResponse")
        );
    }

    #[test]
    fn test_print_with_accessors() {
        let views = transform("GetShelf", "- print: ['Shelf %s has %s', $resp.name, '$resp.labels{\"color\"}']").unwrap();
        let OutputView::Print(print) = &views[0] else {
            panic!("expected print");
        };
        assert_eq!(print.format.format, "Shelf %s has %s");
        assert_eq!(
            print.format.args,
            vec!["response.getName()", "response.getLabels().get(\"color\")"]
        );
    }

    #[test]
    fn test_map_loop_declares_key_and_value() {
        let views = transform(
            "GetShelf",
            r#"
- loop:
    map: $resp.labels
    key: label
    body:
    - print: ["%s", label]
"#,
        )
        .unwrap();
        let OutputView::MapLoop(map_loop) = &views[0] else {
            panic!("expected map loop");
        };
        assert_eq!(map_loop.key_variable_name.as_deref(), Some("label"));
        assert_eq!(map_loop.value_variable_name, None);
        assert_eq!(map_loop.key_type_name, "String");
        assert_eq!(map_loop.body.len(), 1);
    }

    #[test]
    fn test_array_loop_over_repeated_field() {
        let views = transform(
            "PublishSeries",
            r#"
- loop:
    collection: $resp.book_names
    variable: book_name
    body:
    - print: ["%s", book_name]
"#,
        )
        .unwrap();
        let OutputView::ArrayLoop(array_loop) = &views[0] else {
            panic!("expected array loop");
        };
        assert_eq!(array_loop.variable_type_name, "String");
        assert_eq!(array_loop.variable_name, "bookName");
        assert_eq!(array_loop.collection.expression(), "response.getBookNames()");
    }

    #[test]
    fn test_define_then_use() {
        let views = transform(
            "ListBooks",
            r#"
- define: title = $resp.title
- comment: ["title is %s\nend", title]
"#,
        )
        .unwrap();
        let OutputView::Define(define) = &views[0] else {
            panic!("expected define");
        };
        assert_eq!(define.variable_type_name, "String");
        assert_eq!(define.reference.expression(), "response.getTitle()");

        let OutputView::Comment(comment) = &views[1] else {
            panic!("expected comment");
        };
        assert_eq!(comment.lines, vec!["title is title", "end"]);
    }

    #[test]
    fn test_write_file_needs_string_contents() {
        let views = transform(
            "GetShelf",
            r#"
- write_file:
    file_name: ["%s.txt", $resp.name]
    contents: $resp.theme
- write_file:
    file_name: ["copy.txt"]
    contents: $resp.theme
"#,
        )
        .unwrap();
        assert!(matches!(&views[0], OutputView::WriteFile(w) if w.is_first));
        assert!(matches!(&views[1], OutputView::WriteFile(w) if !w.is_first));

        let err = message(transform(
            "GetShelf",
            "- write_file: {file_name: [out.txt], contents: $resp.kind}",
        ));
        assert!(err.starts_with("Output to file: expected string or bytes"));
    }

    #[test]
    fn test_statement_field_count() {
        assert_eq!(
            message(transform("GetShelf", "- {print: ['%s', $resp], define: 'x = $resp'}")),
            "only one field of OutputSpec may be set"
        );
        assert_eq!(
            message(transform("GetShelf", "- {}")),
            "one field of OutputSpec must be set"
        );
    }

    #[test]
    fn test_loop_shape_errors() {
        assert_eq!(
            message(transform("GetShelf", "- loop: {collection: $resp.labels}")),
            "Bad format: `variable` must be specified if `collection` is specified."
        );
        assert_eq!(
            message(transform("GetShelf", "- loop: {map: $resp.labels, variable: x}")),
            "Bad format: `variable` can't be specified if `map` is specified."
        );
        assert_eq!(
            message(transform("GetShelf", "- loop: {key: k}")),
            "Bad format: exactly one of `map` and `collection` should be specified in `loop`."
        );
    }

    #[test]
    fn test_duplicate_variable_in_sibling_scopes() {
        let err = message(transform(
            "PublishSeries",
            r#"
- loop:
    collection: $resp.book_names
    variable: name
    body: [{print: ["%s", name]}]
- loop:
    collection: $resp.book_names
    variable: name
    body: [{print: ["%s", name]}]
"#,
        ));
        assert_eq!(err, "duplicate variable declaration not allowed: name");
    }

    #[test]
    fn test_loop_variable_not_visible_after_loop() {
        let err = message(transform(
            "PublishSeries",
            r#"
- loop:
    collection: $resp.book_names
    variable: name
    body: [{print: ["%s", name]}]
- print: ["%s", name]
"#,
        ));
        assert_eq!(err, "variable not defined: name");
    }

    #[test]
    fn test_accessor_errors() {
        assert_eq!(
            message(transform("GetShelf", "- print: ['%s', $resp.author]")),
            "type google.example.library.v1.Shelf does not have field author"
        );
        assert_eq!(
            message(transform("GetShelf", "- print: ['%s', '$resp.name[0]']")),
            "$resp.name[0] is not a repeated field"
        );
        assert_eq!(
            message(transform("GetShelf", "- print: ['%s', '$resp.labels{3}']")),
            "expected string type for map key: $resp.labels{3}"
        );
        assert_eq!(
            message(transform("GetShelf", "- define: response = $resp")),
            "cannot define variable \"response\": it is used by the sample template"
        );
    }

    #[test]
    fn test_python_accessors() {
        let model = library_model();
        let config = resolved_method(&model, "GetShelf");
        let method = model.interface(LIBRARY_SERVICE).unwrap().method("GetShelf").unwrap();
        let views = OutputTransformer::new(&model, &PYTHON_NAMING, method, &config, "sample")
            .transform(&parse_specs("- print: ['%s', $resp.theme]"))
            .unwrap();
        let OutputView::Print(print) = &views[0] else {
            panic!("expected print");
        };
        assert_eq!(print.format.args, vec!["response.theme"]);
    }
}

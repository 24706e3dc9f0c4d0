//! Lint for field name patterns naming an undeclared collection.

use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, method_location};
use crate::pipeline::Diagnostic;

pub struct CollectionReferenceLint;

impl Lint for CollectionReferenceLint {
    fn name(&self) -> &'static str {
        "collection-reference"
    }

    fn description(&self) -> &'static str {
        "Detect field name patterns whose entity has no collection"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            if model.interface(&entry.name).is_none() {
                continue;
            }
            for method in &entry.methods {
                for (field, entity) in &method.field_name_patterns {
                    if entry.collections.iter().any(|c| &c.entity_name == entity) {
                        continue;
                    }
                    diagnostics.push(
                        Diagnostic::error(
                            PHASE,
                            format!(
                                "entity '{}' for field '{}' has no collection in {}",
                                entity, field, entry.name
                            ),
                        )
                        .at(method_location(&entry.name, &method.name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{library_model, parse_config};

    #[test]
    fn test_unknown_entity() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  collections:
  - name_pattern: shelves/{shelf}
    entity_name: shelf
  methods:
  - name: GetShelf
    field_name_patterns:
      name: shelf
  - name: DeleteShelf
    field_name_patterns:
      name: bookcase
"#,
        );

        let mut diagnostics = Vec::new();
        CollectionReferenceLint.check(&library_model(), &config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "entity 'bookcase' for field 'name' has no collection in google.example.library.v1.LibraryService"
        );
    }
}

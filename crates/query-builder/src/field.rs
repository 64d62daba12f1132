use std::collections::HashSet;

use graphql_parser::{
    query::{InlineFragment, Selection, SelectionSet, TypeCondition},
    Pos,
};
use indexmap::IndexMap;

use crate::argument::Argument;

/// Synthesized AST nodes carry a zero source position.
pub(crate) fn zero_pos() -> Pos {
    Pos { line: 0, column: 0 }
}

/// An argument value together with the GraphQL type declared for its
/// variable, e.g. `ID!` or `[Int!]`. Neither is validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValue {
    pub var_type: String,
    pub value: serde_json::Value,
}

/// A query variable after rendering: the globally unique variable name maps
/// to this, keeping track of the argument it originally belonged to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    pub argument_name: String,
    pub var_type: String,
    pub value: serde_json::Value,
}

/// One selectable field in a query document.
///
/// A field owns its subfields and inline-fragment branches outright; the
/// tree is a strict forest, built once and rendered once. Rendering walks it
/// depth-first, assigning every argument a variable name unique across the
/// whole document.
#[derive(Debug, Clone, Default)]
pub struct Field {
    name: String,
    alias: Option<String>,
    variables: IndexMap<String, VariableValue>,
    subfields: Vec<Field>,
    inline_fragments: IndexMap<String, Vec<Field>>,
    formatted_variables: IndexMap<String, ResolvedVariable>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the alias under which the field's result appears in the
    /// response. The last call wins.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Binds an argument to a query variable of the given declared type. The
    /// value ends up in the request payload, not in the query text.
    #[must_use]
    pub fn argument(
        mut self,
        name: impl Into<String>,
        var_type: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.variables.insert(
            name.into(),
            VariableValue {
                var_type: var_type.into(),
                value: value.into(),
            },
        );
        self
    }

    /// Appends a child field. Selection order follows call order.
    #[must_use]
    pub fn subfield(mut self, field: Field) -> Self {
        self.subfields.push(field);
        self
    }

    /// Registers an inline-fragment branch applying when the runtime type of
    /// this field matches `type_name`. Registering the same type name again
    /// silently replaces the earlier branch.
    #[must_use]
    pub fn inline_fragment(mut self, type_name: impl Into<String>, fields: Vec<Field>) -> Self {
        self.inline_fragments.insert(type_name.into(), fields);
        self
    }

    /// Renders the tree rooted at this field, starting a fresh variable-name
    /// pool. `index` is this field's position among the operation's root
    /// fields and prefixes every variable name in the subtree.
    pub fn to_ast(&mut self, index: usize) -> graphql_parser::query::Field<'static, String> {
        let mut used_names = HashSet::new();
        self.to_ast_with(index, &mut used_names)
    }

    /// Renders with a caller-supplied name pool. Every recursive call shares
    /// the same set, since variable names must be unique across the whole
    /// document rather than per subtree. The set is only borrowed for the
    /// duration of the call.
    pub fn to_ast_with(
        &mut self,
        index: usize,
        used_names: &mut HashSet<String>,
    ) -> graphql_parser::query::Field<'static, String> {
        self.resolve_variables(index, used_names);

        let arguments = self
            .formatted_variables
            .iter()
            .map(|(unique_name, variable)| {
                Argument::new(&variable.argument_name, unique_name).to_ast()
            })
            .collect();

        graphql_parser::query::Field {
            position: zero_pos(),
            alias: self.alias.clone(),
            name: self.name.clone(),
            arguments,
            directives: Vec::new(),
            selection_set: SelectionSet {
                span: (zero_pos(), zero_pos()),
                items: self.render_selections(index, used_names),
            },
        }
    }

    /// The resolved variables of the whole subtree: this field's own first,
    /// then each subfield's, then each inline-fragment branch's, in order.
    /// Only meaningful after rendering. Keys are already unique, so merging
    /// never drops an entry.
    pub fn formatted_variables(&self) -> IndexMap<String, ResolvedVariable> {
        let mut variables = self.formatted_variables.clone();

        for subfield in &self.subfields {
            variables.extend(subfield.formatted_variables());
        }

        for fields in self.inline_fragments.values() {
            for field in fields {
                variables.extend(field.formatted_variables());
            }
        }

        variables
    }

    /// Picks a unique name for every argument of this field. Names must be
    /// reserved one at a time: two identical `(index, argument)` pairs at
    /// different depths would otherwise both settle on the same candidate.
    fn resolve_variables(&mut self, index: usize, used_names: &mut HashSet<String>) {
        self.formatted_variables.clear();

        for (argument_name, variable) in &self.variables {
            let base_name = format!("{index}_{argument_name}");

            let mut unique_name = base_name.clone();
            let mut counter = 1;

            while used_names.contains(&unique_name) {
                unique_name = format!("{base_name}_{counter}");
                counter += 1;
            }

            used_names.insert(unique_name.clone());

            self.formatted_variables.insert(
                unique_name,
                ResolvedVariable {
                    argument_name: argument_name.clone(),
                    var_type: variable.var_type.clone(),
                    value: variable.value.clone(),
                },
            );
        }
    }

    /// Subfields first, inline fragments after, both in insertion order. A
    /// leaf produces no items, and graphql-parser omits the braces of an
    /// empty selection set, keeping scalar fields valid.
    fn render_selections(
        &mut self,
        index: usize,
        used_names: &mut HashSet<String>,
    ) -> Vec<Selection<'static, String>> {
        let mut items: Vec<Selection<'static, String>> = self
            .subfields
            .iter_mut()
            .map(|subfield| Selection::Field(subfield.to_ast_with(index, used_names)))
            .collect();

        for (type_name, fields) in &mut self.inline_fragments {
            items.push(Selection::InlineFragment(InlineFragment {
                position: zero_pos(),
                type_condition: Some(TypeCondition::On(type_name.clone())),
                directives: Vec::new(),
                selection_set: SelectionSet {
                    span: (zero_pos(), zero_pos()),
                    items: fields
                        .iter_mut()
                        .map(|field| Selection::Field(field.to_ast_with(index, used_names)))
                        .collect(),
                },
            }));
        }

        items
    }
}

use std::{collections::HashSet, fmt};

use graphql_parser::query::{
    Definition, Document, Mutation, OperationDefinition, Query, Selection, SelectionSet,
    Subscription, Type, VariableDefinition,
};
use indexmap::IndexMap;

use crate::field::{zero_pos, Field, ResolvedVariable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

/// A complete operation assembled from one or more root fields.
///
/// Each root field renders with its position as the variable-name prefix, and
/// all roots share one name pool, so variables stay unique across the whole
/// document.
#[derive(Debug, Clone)]
pub struct Operation {
    operation_type: OperationType,
    name: String,
    roots: Vec<Field>,
}

impl Operation {
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(OperationType::Query, name)
    }

    pub fn mutation(name: impl Into<String>) -> Self {
        Self::new(OperationType::Mutation, name)
    }

    pub fn subscription(name: impl Into<String>) -> Self {
        Self::new(OperationType::Subscription, name)
    }

    fn new(operation_type: OperationType, name: impl Into<String>) -> Self {
        Self {
            operation_type,
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// Appends a root field. Selection order follows call order.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.roots.push(field);
        self
    }

    /// Renders every root field and assembles the executable document
    /// together with its resolved variables.
    pub fn render(mut self) -> RenderedOperation {
        let mut used_names = HashSet::new();

        let items = self
            .roots
            .iter_mut()
            .enumerate()
            .map(|(index, root)| Selection::Field(root.to_ast_with(index, &mut used_names)))
            .collect();

        let mut variables = IndexMap::new();
        for root in &self.roots {
            variables.extend(root.formatted_variables());
        }

        let variable_definitions = variables
            .iter()
            .map(|(unique_name, variable)| VariableDefinition {
                position: zero_pos(),
                name: unique_name.clone(),
                var_type: parse_var_type(&variable.var_type),
                default_value: None,
            })
            .collect();

        let selection_set = SelectionSet {
            span: (zero_pos(), zero_pos()),
            items,
        };

        let definition = match self.operation_type {
            OperationType::Query => OperationDefinition::Query(Query {
                position: zero_pos(),
                name: Some(self.name),
                variable_definitions,
                directives: Vec::new(),
                selection_set,
            }),
            OperationType::Mutation => OperationDefinition::Mutation(Mutation {
                position: zero_pos(),
                name: Some(self.name),
                variable_definitions,
                directives: Vec::new(),
                selection_set,
            }),
            OperationType::Subscription => OperationDefinition::Subscription(Subscription {
                position: zero_pos(),
                name: Some(self.name),
                variable_definitions,
                directives: Vec::new(),
                selection_set,
            }),
        };

        RenderedOperation {
            document: Document {
                definitions: vec![Definition::Operation(definition)],
            },
            variables,
        }
    }
}

/// The output of [`Operation::render`]: a document serializable through
/// `Display` and the variables that accompany it in the request.
#[derive(Debug, Clone)]
pub struct RenderedOperation {
    document: Document<'static, String>,
    variables: IndexMap<String, ResolvedVariable>,
}

impl RenderedOperation {
    pub fn document(&self) -> &Document<'static, String> {
        &self.document
    }

    /// The `variables` object of the request payload: unique variable name
    /// to value.
    pub fn variables(&self) -> serde_json::Map<String, serde_json::Value> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.clone(), variable.value.clone()))
            .collect()
    }

    /// The full resolved mapping, including declared types and the argument
    /// names the variables originated from.
    pub fn resolved_variables(&self) -> &IndexMap<String, ResolvedVariable> {
        &self.variables
    }
}

impl fmt::Display for RenderedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.fmt(f)
    }
}

/// Reads a declared type such as `ID!` or `[Int!]` into the AST
/// representation. A string that doesn't follow the type grammar is passed
/// through verbatim as a named type; declared types are not validated any
/// more than the rest of the input.
fn parse_var_type(raw: &str) -> Type<'static, String> {
    read_var_type(raw).unwrap_or_else(|| Type::NamedType(raw.to_owned()))
}

fn read_var_type(raw: &str) -> Option<Type<'static, String>> {
    let raw = raw.trim();

    if let Some(inner) = raw.strip_suffix('!') {
        return read_var_type(inner).map(|inner| Type::NonNullType(Box::new(inner)));
    }

    if let Some(inner) = raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return read_var_type(inner).map(|inner| Type::ListType(Box::new(inner)));
    }

    if raw.is_empty() || !raw.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    Some(Type::NamedType(raw.to_owned()))
}

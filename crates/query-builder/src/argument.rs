use graphql_parser::query::Value;

/// A single field argument bound to a query variable.
///
/// Arguments always render as variable references, never as inline literals,
/// so that every value in the document is parameterized and the request
/// payload built from the resolved variables matches exactly what the query
/// text references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    variable: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable: variable.into(),
        }
    }

    /// The argument list entry graphql-parser expects: the argument name
    /// paired with a reference to the variable it binds to.
    pub fn to_ast(&self) -> (String, Value<'static, String>) {
        (self.name.clone(), Value::Variable(self.variable.clone()))
    }
}

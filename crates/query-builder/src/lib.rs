//! # GraphQL query builder
//!
//! The runtime shared by generated client SDKs: a small object model for
//! assembling a GraphQL operation programmatically. Client code (generated
//! or hand-written) builds a tree of [`Field`]s, each optionally carrying an
//! alias, arguments, child fields and inline fragments, then renders the
//! tree into `graphql_parser` AST nodes ready for serialization.
//!
//! Every argument value becomes a query variable rather than an inline
//! literal. Rendering assigns each variable a name that is unique across the
//! whole document (`{index}_{argument}` with a numeric suffix on collision),
//! so the same field can be selected several times under different aliases
//! without its arguments clashing. The resolved variables double as the
//! request payload sent alongside the query text.
//!
//! ```
//! use sdkgen_query_builder::{Field, Operation};
//!
//! let user = Field::new("user")
//!     .argument("id", "ID!", 5)
//!     .subfield(Field::new("name"));
//!
//! let rendered = Operation::query("GetUser").field(user).render();
//!
//! assert_eq!(
//!     rendered.to_string(),
//!     "query GetUser($0_id: ID!) {\n  user(id: $0_id) {\n    name\n  }\n}\n"
//! );
//! assert_eq!(rendered.variables()["0_id"], 5);
//! ```
//!
//! The builder performs no schema validation: names, types and values are
//! rendered as given, and correctness of the resulting document is the
//! caller's responsibility.

mod argument;
mod field;
mod operation;

#[cfg(test)]
mod tests;

pub use argument::Argument;
pub use field::{Field, ResolvedVariable, VariableValue};
pub use operation::{Operation, OperationType, RenderedOperation};

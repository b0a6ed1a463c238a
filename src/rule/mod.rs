//! Rule catalog: data model plus load/serialize/introspection.

pub mod model;
pub mod catalog;

pub use model::{CheckKind, RuleDefinition};
pub use catalog::RuleCatalog;

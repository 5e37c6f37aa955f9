//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::VariableResolver;
//! use courier_domain::OrderedMap;
//!
//! let mut variables = OrderedMap::new();
//! variables.insert("host".to_string(), "localhost".to_string());
//!
//! let resolver = VariableResolver::new(&variables);
//! let result = resolver.resolve("http://{{host}}/api");
//! assert_eq!(result.resolved, "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolver};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};

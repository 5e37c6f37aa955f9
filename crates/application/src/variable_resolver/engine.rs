//! Variable resolution engine
//!
//! Substitutes `{{variable}}` references with values from a variable map.

use serde_json::Value as JsonValue;

use courier_domain::{OrderedMap, RequestBody};

use super::parser::parse_variables;

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The string with every known variable substituted.
    pub resolved: String,

    /// Names that were substituted, in order of appearance.
    pub resolved_variables: Vec<String>,

    /// Names with no value; their `{{...}}` text is kept verbatim.
    pub unresolved: Vec<String>,

    /// Whether all variables were successfully resolved.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }
}

/// The variable resolution engine.
///
/// Substitution is a single pass: a value that itself contains `{{x}}` is
/// inserted literally and not resolved again.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    variables: &'a OrderedMap,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver over the given variables.
    #[must_use]
    pub const fn new(variables: &'a OrderedMap) -> Self {
        Self { variables }
    }

    /// Resolves all variables in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);

        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_variables = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(value) = self.variables.get(&var_ref.name) {
                result.push_str(value);
                resolved_variables.push(var_ref.name.clone());
            } else {
                result.push_str(&input[var_ref.span.clone()]);
                unresolved.push(var_ref.name.clone());
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolutionResult {
            resolved: result,
            resolved_variables,
            unresolved,
            is_complete,
        }
    }

    /// Resolves a string, discarding the bookkeeping.
    #[must_use]
    pub fn resolve_str(&self, input: &str) -> String {
        self.resolve(input).resolved
    }

    /// Resolves every string leaf of a JSON value. Keys, numbers and other
    /// scalars are left untouched.
    #[must_use]
    pub fn resolve_json(&self, value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::String(s) => JsonValue::String(self.resolve_str(s)),
            JsonValue::Array(items) => {
                JsonValue::Array(items.iter().map(|v| self.resolve_json(v)).collect())
            }
            JsonValue::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_json(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Resolves every value of a string map.
    #[must_use]
    pub fn resolve_map(&self, map: &OrderedMap) -> OrderedMap {
        map.iter()
            .map(|(k, v)| (k.clone(), self.resolve_str(v)))
            .collect()
    }

    /// Resolves a request body.
    ///
    /// A JSON body is resolved on its serialized text and parsed back, so a
    /// value may splice in structure; if the result no longer parses, the
    /// resolved text is sent as a plain text body.
    #[must_use]
    pub fn resolve_body(&self, body: &RequestBody) -> RequestBody {
        match body {
            RequestBody::Text(text) => RequestBody::Text(self.resolve_str(text)),
            RequestBody::Form(fields) => RequestBody::Form(self.resolve_map(fields)),
            RequestBody::Json(value) => {
                let serialized = value.to_string();
                let resolved = self.resolve(&serialized);
                if resolved.resolved_variables.is_empty() {
                    return body.clone();
                }
                serde_json::from_str(&resolved.resolved)
                    .map_or_else(|_| RequestBody::Text(resolved.resolved), RequestBody::Json)
            }
        }
    }

    /// Lists the variables in `input` that have no value.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_variables(input)
            .into_iter()
            .filter(|r| !self.variables.contains_key(&r.name))
            .map(|r| r.name)
            .collect()
    }
}

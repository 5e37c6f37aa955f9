//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

/// A parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}), trimmed of surrounding whitespace.
    pub name: String,

    /// Byte range in the original string covering the whole `{{...}}`.
    pub span: Range<usize>,
}

/// Parses a string and extracts all variable references.
///
/// A reference is `{{`, one or more characters other than `}`, then `}}`.
/// The name is the inner text with surrounding whitespace trimmed;
/// references whose name is blank are ignored. A `{{` with no matching
/// close is left alone, and scanning resumes right after its first brace.
///
/// # Examples
///
/// ```
/// use courier_application::variable_resolver::parse_variables;
///
/// let refs = parse_variables("https://{{host}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "host");
/// assert_eq!(refs[1].name, "id");
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let bytes = input.as_bytes();
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find("{{") {
        let start = cursor + offset;
        let name_start = start + 2;

        let Some(name_len) = input[name_start..].find('}') else {
            break;
        };
        let name_end = name_start + name_len;

        if name_len > 0 && bytes.get(name_end + 1) == Some(&b'}') {
            let name = input[name_start..name_end].trim();
            if !name.is_empty() {
                references.push(VariableReference {
                    name: name.to_string(),
                    span: start..name_end + 2,
                });
            }
            cursor = name_end + 2;
        } else {
            cursor = start + 1;
        }
    }

    references
}

/// Returns true if the input string contains any variable references.
#[must_use]
pub fn has_variables(input: &str) -> bool {
    !parse_variables(input).is_empty()
}

/// Extracts just the variable names from the input, in order of appearance.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_variables(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{name}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..8);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let refs = parse_variables("Bearer {{  token  }}");
        assert_eq!(refs[0].name, "token");
        assert_eq!(refs[0].span, 7..20);
    }

    #[test]
    fn test_parse_multiple_variables() {
        let names = extract_variable_names("{{scheme}}://{{host}}:{{port}}/api");
        assert_eq!(names, vec!["scheme", "host", "port"]);
    }

    #[test]
    fn test_names_may_contain_any_non_brace_text() {
        let names = extract_variable_names("{{api.key}} {{user-id}} {{a b}} {{$ts}}");
        assert_eq!(names, vec!["api.key", "user-id", "a b", "$ts"]);
    }

    #[test]
    fn test_empty_and_blank_names_are_ignored() {
        assert!(parse_variables("{{}}").is_empty());
        assert!(parse_variables("{{   }}").is_empty());
    }

    #[test]
    fn test_unclosed_reference() {
        assert!(parse_variables("{{name").is_empty());
        assert!(parse_variables("{{name}").is_empty());
        assert!(parse_variables("{{a}b}}").is_empty());
    }

    #[test]
    fn test_single_braces_are_literal() {
        assert!(parse_variables("{\"a\": {\"b\": 1}}").is_empty());
    }

    #[test]
    fn test_extra_opening_brace_becomes_part_of_name() {
        let refs = parse_variables("{{{x}}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "{x");
        assert_eq!(refs[0].span, 0..6);
    }

    #[test]
    fn test_unclosed_then_valid() {
        let refs = parse_variables("{{a} {{b}}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "b");
        assert_eq!(refs[0].span, 5..10);
    }

    #[test]
    fn test_multibyte_text_around_references() {
        let input = "héllo {{wörld}} ✓";
        let refs = parse_variables(input);
        assert_eq!(refs[0].name, "wörld");
        assert_eq!(&input[refs[0].span.clone()], "{{wörld}}");
    }

    #[test]
    fn test_has_variables() {
        assert!(has_variables("{{x}}"));
        assert!(!has_variables("no vars"));
        assert!(!has_variables("{{}}"));
    }
}

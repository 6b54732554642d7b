//! `{token}` template substitution

use super::lookup::StringLookup;

const START_CHAR: u8 = b'{';
const END_CHAR: u8 = b'}';

/// Rewrites `{key}` tokens using a [`StringLookup`].
///
/// Each `}` is paired with the nearest `{` before it that has not already
/// been consumed. The first `}` without such a partner ends substitution and
/// the rest of the template is copied verbatim, as is a trailing `{` that is
/// never closed. Unknown keys become the empty string. Replacement text is
/// never rescanned.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSubstitutor;

impl StringSubstitutor {
    pub fn new() -> Self {
        Self
    }

    pub fn substitute(&self, template: &str, lookup: &dyn StringLookup) -> String {
        if template.is_empty() {
            return String::new();
        }

        let bytes = template.as_bytes();
        let mut result = String::with_capacity(template.len());
        let mut cursor = 0;

        while cursor < bytes.len() {
            let Some(end) = find_end(bytes, cursor) else {
                break;
            };
            let Some(start) = find_start(bytes, cursor, end) else {
                break;
            };

            result.push_str(&template[cursor..start]);
            if let Some(value) = lookup.lookup(&template[start + 1..end]) {
                result.push_str(&value);
            }
            cursor = end + 1;
        }

        result.push_str(&template[cursor..]);
        result
    }
}

fn find_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == END_CHAR)
        .map(|offset| from + offset)
}

fn find_start(bytes: &[u8], floor: usize, end: usize) -> Option<usize> {
    bytes[floor..end].iter().rposition(|&b| b == START_CHAR).map(|offset| floor + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::lookup::SupplierLookup;

    fn lookup() -> SupplierLookup<'static> {
        let mut lookup = SupplierLookup::new();
        lookup.add_supplier("method", || "void save(String)".to_string());
        lookup.add_supplier("parameters", || "\"abc\"".to_string());
        lookup.add_supplier("nested", || "{method}".to_string());
        lookup
    }

    fn substitute(template: &str) -> String {
        StringSubstitutor::new().substitute(template, &lookup())
    }

    #[test]
    fn test_tokens_are_replaced() {
        assert_eq!(
            substitute("Entering {method} with {parameters}"),
            "Entering void save(String) with \"abc\""
        );
    }

    #[test]
    fn test_empty_and_token_free_templates() {
        assert_eq!(substitute(""), "");
        assert_eq!(substitute("plain text"), "plain text");
    }

    #[test]
    fn test_unknown_and_empty_keys_become_empty() {
        assert_eq!(substitute("a{unknown}b"), "ab");
        assert_eq!(substitute("a{}b"), "ab");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        assert_eq!(substitute("[{nested}]"), "[{method}]");
    }

    #[test]
    fn test_nearest_open_brace_wins() {
        assert_eq!(substitute("{{method}"), "{void save(String)");
    }

    #[test]
    fn test_unmatched_braces_pass_through() {
        assert_eq!(substitute("open {method"), "open {method");
        assert_eq!(substitute("a}b{method}"), "a}b{method}");
        assert_eq!(substitute("{method}} tail"), "void save(String)} tail");
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        assert_eq!(substitute("é{method}ü"), "évoid save(String)ü");
    }
}

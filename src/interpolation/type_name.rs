//! Helpers for Rust type names as written in source or reported by
//! `std::any::type_name`

/// Strip module paths everywhere in a type name, keeping generics.
///
/// `alloc::vec::Vec<shop::Order>` becomes `Vec<Order>`.
pub fn simple_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment_start = 0;
    let bytes = name.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b':' && bytes.get(i + 1) == Some(&b':') {
            // drop everything of the current path segment written so far
            out.truncate(segment_start);
            i += 2;
            continue;
        }
        let c = bytes[i];
        if !is_ident_byte(c) {
            out.push(c as char);
            segment_start = out.len();
            i += 1;
            continue;
        }
        // copy a run of identifier bytes
        let run_end = bytes[i..]
            .iter()
            .position(|b| !is_ident_byte(*b))
            .map_or(bytes.len(), |p| i + p);
        out.push_str(&name[i..run_end]);
        i = run_end;
    }
    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}

/// Last path segment without generic arguments: `a::b::Page<T>` -> `Page`
pub fn base_type_name(name: &str) -> &str {
    let without_generics = name.split('<').next().unwrap_or(name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim()
}

/// Collapse whitespace the way `stringify!` spaces out tokens:
/// `Vec < String >` becomes `Vec<String>`.
pub fn normalize_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let prev_is_word = out
                .chars()
                .last()
                .is_some_and(|p| p.is_alphanumeric() || p == '_');
            if prev_is_word && (c.is_alphanumeric() || c == '_') {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
        if c == ',' {
            out.push(' ');
        }
    }
    out
}

/// Whether `name` is a plain type path: identifiers joined by `::`
pub fn is_valid_type_path(name: &str) -> bool {
    !name.is_empty()
        && name.split("::").all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    (first.is_alphabetic() || first == '_')
                        && chars.all(|c| c.is_alphanumeric() || c == '_')
                        && segment != "_"
                }
                None => false,
            }
        })
}

/// Whether a configured type path names the type `actual`.
///
/// The configured path may omit module segments: its segments must appear
/// in order within `actual`'s path and both must end in the same type name.
/// `std`, `core` and `alloc` are treated as the same root, so `std::io::Error`
/// matches the reported `std::io::error::Error` and `Order` matches
/// `shop::orders::Order<T>`.
pub fn type_path_matches(configured: &str, actual: &str) -> bool {
    let configured = configured.trim();
    if configured == actual {
        return true;
    }

    let wanted: Vec<&str> = path_segments(configured).collect();
    let have: Vec<&str> = path_segments(actual).collect();
    match (wanted.last(), have.last()) {
        (Some(w), Some(h)) if w == h => {}
        _ => return false,
    }

    let mut have_iter = have.iter();
    wanted
        .iter()
        .all(|w| have_iter.any(|h| same_segment(w, h)))
}

fn path_segments(name: &str) -> impl Iterator<Item = &str> {
    name.split('<')
        .next()
        .unwrap_or(name)
        .split("::")
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn same_segment(a: &str, b: &str) -> bool {
    const ROOTS: [&str; 3] = ["std", "core", "alloc"];
    a == b || (ROOTS.contains(&a) && ROOTS.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name("alloc::string::String"), "String");
        assert_eq!(
            simple_type_name("alloc::vec::Vec<shop::orders::Order>"),
            "Vec<Order>"
        );
        assert_eq!(
            simple_type_name("std::collections::HashMap<alloc::string::String, u32>"),
            "HashMap<String, u32>"
        );
        assert_eq!(simple_type_name("&[u8]"), "&[u8]");
        assert_eq!(simple_type_name("()"), "()");
    }

    #[test]
    fn test_base_type_name() {
        assert_eq!(base_type_name("shop::Page<shop::Order>"), "Page");
        assert_eq!(base_type_name("Order"), "Order");
    }

    #[test]
    fn test_normalize_type_name() {
        assert_eq!(normalize_type_name("Vec < String >"), "Vec<String>");
        assert_eq!(normalize_type_name("HashMap < String , u32 >"), "HashMap<String, u32>");
        assert_eq!(normalize_type_name("& mut str"), "&mut str");
        assert_eq!(normalize_type_name("Option<Box<dyn Error>>"), "Option<Box<dyn Error>>");
    }

    #[test]
    fn test_type_path_matches() {
        assert!(type_path_matches("shop::orders::Order", "shop::orders::Order"));
        assert!(type_path_matches("Order", "shop::orders::Order"));
        assert!(type_path_matches("shop::Order", "shop::orders::Order"));
        assert!(type_path_matches("std::io::Error", "std::io::error::Error"));
        assert!(type_path_matches("std::num::ParseIntError", "core::num::error::ParseIntError"));
        assert!(type_path_matches("Page", "shop::Page<shop::Order>"));
        assert!(!type_path_matches("Order", "shop::OrderLine"));
        assert!(!type_path_matches("billing::Order", "shop::orders::Order"));
        assert!(!type_path_matches("orders::shop::Order", "shop::orders::Order"));
    }

    #[test]
    fn test_valid_type_path() {
        assert!(is_valid_type_path("shop::orders::Order"));
        assert!(is_valid_type_path("Order"));
        assert!(!is_valid_type_path(""));
        assert!(!is_valid_type_path("shop::"));
        assert!(!is_valid_type_path("9lives"));
        assert!(!is_valid_type_path("a b"));
        assert!(!is_valid_type_path("Vec<T>"));
    }
}

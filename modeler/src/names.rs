//! Name derivation from WSDL identifiers.
//!
//! WSDL names are XML NCNames and may contain characters Rust
//! identifiers cannot. Types get UpperCamelCase, methods and
//! parameters get snake_case, and anything that lands on a keyword is
//! prefixed with an underscore.

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

fn is_word_boundary(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

fn words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;
    let mut previous_upper = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if is_word_boundary(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            previous_upper = false;
            continue;
        }

        // split camelCase humps; an uppercase run ends one letter
        // before a following lowercase letter, so HTTPBinding is
        // "http" + "binding"
        if c.is_ascii_uppercase() && !current.is_empty() {
            let next_lower = chars.peek().map_or(false, |next| next.is_ascii_lowercase());
            if previous_lower || (previous_upper && next_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        previous_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        previous_upper = c.is_ascii_uppercase();
        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// UpperCamelCase, for generated service, port, bean, and exception
/// type names.
pub fn type_name(raw: &str) -> String {
    let words = words(raw);
    if words.is_empty() {
        return "Unnamed".to_owned();
    }

    let mut result = String::new();
    for word in &words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

/// snake_case, for method and parameter names. Keywords come back
/// underscore-prefixed.
pub fn var_name(raw: &str) -> String {
    let words = words(raw);
    if words.is_empty() {
        return "_unnamed".to_owned();
    }

    let mut result = words.join("_");
    if result.starts_with(|c: char| c.is_ascii_digit()) || is_reserved(&result) {
        result.insert(0, '_');
    }

    result
}

use std::fmt;

/// Type descriptor attached to declarations, rendered as a TypeScript type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Number,
    String,
    Boolean,
    Null,
    Any,
    /// Return type of a function without a top-level `return`.
    Void,
    Array(Box<Kind>),
    /// Flat object literal; keys keep declaration order.
    Object(Vec<(String, Kind)>),
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Any
    }
}

impl Kind {
    pub fn array_of(element: Kind) -> Self {
        Kind::Array(Box::new(element))
    }
}

fn is_identifier_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if is_identifier_name(key) {
        return write!(f, "{}", key);
    }
    match serde_json::to_string(key) {
        Ok(quoted) => write!(f, "{}", quoted),
        Err(_) => write!(f, "\"{}\"", key),
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Number => write!(f, "number"),
            Kind::String => write!(f, "string"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Null => write!(f, "null"),
            Kind::Any => write!(f, "any"),
            Kind::Void => write!(f, "void"),
            Kind::Array(element) => write!(f, "{}[]", element),
            Kind::Object(entries) if entries.is_empty() => write!(f, "{{}}"),
            Kind::Object(entries) => {
                write!(f, "{{ ")?;
                for (i, (key, kind)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write_key(f, key)?;
                    write!(f, ": {}", kind)?;
                }
                write!(f, " }}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_typescript_syntax() {
        assert_eq!(Kind::array_of(Kind::Number).to_string(), "number[]");
        assert_eq!(Kind::array_of(Kind::array_of(Kind::Any)).to_string(), "any[][]");
        assert_eq!(Kind::Object(vec![]).to_string(), "{}");

        let obj = Kind::Object(vec![
            ("a".into(), Kind::Number),
            ("b-c".into(), Kind::String),
            ("d".into(), Kind::Object(vec![("e".into(), Kind::Boolean)])),
        ]);
        assert_eq!(obj.to_string(), "{ a: number; \"b-c\": string; d: { e: boolean } }");
    }
}

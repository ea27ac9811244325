use crate::profile::DocError;
use crate::statics;
use crate::value::{PkNumber, PkValue};

// Accepted "true" spellings for boolean coercion; anything else is false.
const TRUE_TOKENS: &[&str] = &["true", "1", "yes"];

/// Typed-coercion translation: the edited text is parsed as the kind the
/// original value already has. Integer and float parses can fail with a
/// `Conversion` error; boolean, string, and null coercions always succeed.
/// Callers must not mutate the document when this fails.
pub fn translate(raw: &str, original: &PkValue) -> Result<PkValue, DocError> {
    match original {
        PkValue::Number(n) if n.is_integer() => parse_integer(raw.trim()),
        PkValue::Number(_) => raw
            .trim()
            .parse::<f64>()
            .map(|v| PkValue::Number(PkNumber::F64(v)))
            .map_err(|_| DocError::Conversion {
                text: raw.to_string(),
                wanted: statics::EN_TYPE_FLOAT,
            }),
        PkValue::Bool(_) => {
            let token = raw.trim().to_ascii_lowercase();
            Ok(PkValue::Bool(TRUE_TOKENS.contains(&token.as_str())))
        }
        // Strings pass through untouched, whitespace included.
        PkValue::String(_) => Ok(PkValue::String(raw.to_string())),
        PkValue::Null => {
            if raw.trim().eq_ignore_ascii_case(statics::EN_LITERAL_NULL) {
                Ok(PkValue::Null)
            } else {
                Ok(PkValue::String(raw.to_string()))
            }
        }
        container => Err(DocError::Conversion {
            text: raw.to_string(),
            wanted: container.type_name(),
        }),
    }
}

fn parse_integer(text: &str) -> Result<PkValue, DocError> {
    if let Ok(v) = text.parse::<i64>() {
        return Ok(PkValue::Number(PkNumber::I64(v)));
    }
    // Above i64::MAX but still a valid profile integer.
    if let Ok(v) = text.parse::<u64>() {
        return Ok(PkValue::Number(PkNumber::U64(v)));
    }
    Err(DocError::Conversion {
        text: text.to_string(),
        wanted: statics::EN_TYPE_INTEGER,
    })
}

/// Value kinds offered when adding a new object key or array item.
pub const NEW_ENTRY_KINDS: &[&str] = &["string", "integer", "boolean", "null", "object", "array"];

/// Default value for a freshly added entry of the picked kind.
pub fn default_value_for_kind(kind: &str) -> Option<PkValue> {
    match kind {
        "string" => Some(PkValue::String(String::new())),
        "integer" => Some(PkValue::integer(0)),
        "boolean" => Some(PkValue::Bool(false)),
        "null" => Some(PkValue::Null),
        "object" => Some(PkValue::empty_object()),
        "array" => Some(PkValue::Array(Vec::new())),
        _ => None,
    }
}

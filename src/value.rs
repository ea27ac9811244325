use crate::statics;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Represents a number that preserves the distinction between I64, U64, and F64
/// across round-tripping. Peacock profiles mix large XP integers with float
/// fields, and rewriting one kind as the other changes what the server reads back.
#[derive(Debug, Clone)]
pub enum PkNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl PkNumber {
    pub fn is_integer(&self) -> bool {
        matches!(self, PkNumber::I64(_) | PkNumber::U64(_))
    }
}

// The I64/U64 split is a parsing width artifact, not a document-visible kind:
// the same integer must compare equal whichever side of i64::MAX it parsed on.
impl PartialEq for PkNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PkNumber::I64(a), PkNumber::I64(b)) => a == b,
            (PkNumber::U64(a), PkNumber::U64(b)) => a == b,
            (PkNumber::I64(a), PkNumber::U64(b)) | (PkNumber::U64(b), PkNumber::I64(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (PkNumber::F64(a), PkNumber::F64(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for PkNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PkNumber::I64(v) => serializer.serialize_i64(*v),
            PkNumber::U64(v) => serializer.serialize_u64(*v),
            PkNumber::F64(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for PkNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> de::Visitor<'de> for NumberVisitor {
            type Value = PkNumber;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(PkNumber::I64(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(PkNumber::U64(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(PkNumber::F64(v))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

/// Tag for the six value kinds. Drives tree labeling, editability, and the
/// typed-coercion rules; matched exhaustively everywhere a value is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => statics::EN_TYPE_NULL,
            ValueKind::Bool => statics::EN_TYPE_BOOL,
            ValueKind::Number => statics::EN_TYPE_NUMBER,
            ValueKind::String => statics::EN_TYPE_STRING,
            ValueKind::Array => statics::EN_TYPE_ARRAY,
            ValueKind::Object => statics::EN_TYPE_OBJECT,
        }
    }

    /// Only scalars are edited in place; containers are navigated.
    pub fn is_leaf(self) -> bool {
        !matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

/// Represents a value in a Peacock user profile (strict JSON).
/// Objects preserve insertion order so an edited profile serializes with the
/// same key layout it was loaded with.
#[derive(Debug, Clone, PartialEq)]
pub enum PkValue {
    Null,
    Bool(bool),
    Number(PkNumber),
    String(String),
    Array(Vec<PkValue>),
    Object(IndexMap<String, PkValue>),
}

impl PkValue {
    pub fn as_object(&self) -> Option<&IndexMap<String, PkValue>> {
        match self {
            PkValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, PkValue>> {
        match self {
            PkValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PkValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            PkValue::Null => ValueKind::Null,
            PkValue::Bool(_) => ValueKind::Bool,
            PkValue::Number(_) => ValueKind::Number,
            PkValue::String(_) => ValueKind::String,
            PkValue::Array(_) => ValueKind::Array,
            PkValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn empty_object() -> PkValue {
        PkValue::Object(IndexMap::new())
    }

    pub fn integer(v: i64) -> PkValue {
        PkValue::Number(PkNumber::I64(v))
    }

    pub fn parse_json(text: &str) -> anyhow::Result<PkValue> {
        // serde_json error messages carry line/column, which the raw editor
        // surfaces verbatim.
        Ok(serde_json::from_str::<PkValue>(text)?)
    }

    /// Serialize in the profile's on-disk style:
    /// - 4-space indentation
    /// - keys in insertion order
    /// - UTF-8 passthrough (only control characters escaped)
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out, 0);
        out
    }

    /// The text a leaf shows in the tree's value column, and the text the
    /// typed-coercion editor starts from. Containers get fixed markers.
    pub fn display_text(&self) -> String {
        match self {
            PkValue::Null => statics::EN_LITERAL_NULL.to_string(),
            PkValue::Bool(v) => if *v { "true" } else { "false" }.to_string(),
            PkValue::Number(n) => {
                let mut out = String::new();
                n.write_json(&mut out);
                out
            }
            PkValue::String(s) => s.clone(),
            PkValue::Array(_) => statics::EN_MARKER_ARRAY.to_string(),
            PkValue::Object(_) => statics::EN_MARKER_OBJECT.to_string(),
        }
    }

    fn write_json(&self, out: &mut String, indent: usize) {
        match self {
            PkValue::Null => out.push_str("null"),
            PkValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            PkValue::Number(n) => n.write_json(out),
            PkValue::String(s) => write_escaped_string(out, s),
            PkValue::Array(values) => {
                out.push('[');
                if !values.is_empty() {
                    out.push('\n');
                    for (i, v) in values.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        v.write_json(out, indent + 4);
                        if i + 1 != values.len() {
                            out.push(',');
                        }
                        out.push('\n');
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push(']');
            }
            PkValue::Object(map) => {
                out.push('{');
                if !map.is_empty() {
                    out.push('\n');
                    for (i, (k, v)) in map.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        write_escaped_string(out, k);
                        out.push_str(": ");
                        v.write_json(out, indent + 4);
                        if i + 1 != map.len() {
                            out.push(',');
                        }
                        out.push('\n');
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push('}');
            }
        }
    }
}

impl PkNumber {
    fn write_json(&self, out: &mut String) {
        match self {
            PkNumber::I64(v) => out.push_str(&v.to_string()),
            PkNumber::U64(v) => out.push_str(&v.to_string()),
            PkNumber::F64(v) => {
                if v.is_finite() {
                    let mut buf = ryu::Buffer::new();
                    out.push_str(buf.format(*v));
                } else {
                    // Strict JSON has no non-finite literals.
                    out.push_str("null");
                }
            }
        }
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04x}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Serialize for PkValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PkValue::Null => serializer.serialize_unit(),
            PkValue::Bool(v) => serializer.serialize_bool(*v),
            PkValue::Number(n) => n.serialize(serializer),
            PkValue::String(s) => serializer.serialize_str(s),
            PkValue::Array(values) => values.serialize(serializer),
            PkValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PkValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = PkValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(PkValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(PkValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(PkValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(PkValue::Number(PkNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(PkValue::Number(PkNumber::U64(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(PkValue::Number(PkNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(PkValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(PkValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<PkValue>()? {
                    values.push(value);
                }
                Ok(PkValue::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, PkValue>()? {
                    values.insert(key, value);
                }
                Ok(PkValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

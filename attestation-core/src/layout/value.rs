/// Logical value produced by decoding a layout and consumed by encoding one.
///
/// `Struct` preserves field order; equality is order-sensitive, matching the
/// layout that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint(u128),
    Bytes(Vec<u8>),
    Str(String),
    Struct(Vec<(String, Value)>),
    Array(Vec<Value>),
    Tagged(String, Box<Value>),
}

impl Value {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn struct_of(fields: Vec<(&str, Value)>) -> Self {
        Value::Struct(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    pub fn tagged(tag: &str, inner: Value) -> Self {
        Value::Tagged(tag.to_string(), Box::new(inner))
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tagged(&self) -> Option<(&str, &Value)> {
        match self {
            Value::Tagged(tag, inner) => Some((tag, inner)),
            _ => None,
        }
    }

    /// Field lookup on a `Struct` value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_struct()?
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

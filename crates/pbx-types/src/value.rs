use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A nested value as produced by an upstream plist parser.
///
/// This is the decoder's input and also the representation used for the
/// free-form bags the graph keeps verbatim (build settings, project
/// attributes, build file settings).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Array(Vec<RawValue>),
    Dictionary(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// An empty dictionary.
    pub fn empty_dictionary() -> Self {
        Self::Dictionary(BTreeMap::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view. Numeric strings count, since text parsers only yield
    /// strings for scalars.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[RawValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, RawValue>> {
        match self {
            Self::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar rendered as text, integers included.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }

    /// The same value with every integer scalar turned into its decimal
    /// string, which is how it reads back from pbxproj text.
    pub fn into_text_form(self) -> Self {
        match self {
            Self::Integer(i) => Self::String(i.to_string()),
            Self::String(_) => self,
            Self::Array(items) => Self::Array(items.into_iter().map(Self::into_text_form).collect()),
            Self::Dictionary(map) => Self::Dictionary(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_text_form()))
                    .collect(),
            ),
        }
    }

    /// Look up a key when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.as_dictionary().and_then(|map| map.get(key))
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        Self::Array(items)
    }
}

impl From<BTreeMap<String, RawValue>> for RawValue {
    fn from(map: BTreeMap<String, RawValue>) -> Self {
        Self::Dictionary(map)
    }
}

impl TryFrom<serde_json::Value> for RawValue {
    type Error = TypeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;
        match value {
            Value::Null => Err(TypeError::UnsupportedValue("null".into())),
            Value::Bool(b) => Ok(Self::String(if b { "YES" } else { "NO" }.into())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Integer(i)),
                None => Ok(Self::String(n.to_string())),
            },
            Value::String(s) => Ok(Self::String(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Self::try_from(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Dictionary),
        }
    }
}

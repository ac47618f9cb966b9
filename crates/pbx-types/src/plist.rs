use std::collections::BTreeMap;

use crate::commented::CommentedString;
use crate::value::RawValue;

/// Recursive presentation value. Built fresh for every encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlistValue {
    String(CommentedString),
    Array(Vec<PlistValue>),
    Dictionary(PlistDictionary),
}

impl PlistValue {
    /// A plain string without comment.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(CommentedString::new(s))
    }

    /// A string with a trailing comment.
    pub fn commented(s: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::String(CommentedString::with_comment(s, comment))
    }

    /// An array of plain strings.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(items.into_iter().map(Self::string).collect())
    }

    pub fn as_string(&self) -> Option<&CommentedString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&PlistDictionary> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

impl From<&RawValue> for PlistValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::String(s) => Self::string(s.clone()),
            RawValue::Integer(i) => Self::string(i.to_string()),
            RawValue::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            RawValue::Dictionary(map) => Self::Dictionary(
                map.iter()
                    .map(|(k, v)| (CommentedString::new(k.clone()), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<PlistDictionary> for PlistValue {
    fn from(dict: PlistDictionary) -> Self {
        Self::Dictionary(dict)
    }
}

/// Dictionary keyed by [`CommentedString`], deduplicating on the key's
/// `string` alone. Re-inserting a key replaces both the value and the
/// key's comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlistDictionary {
    entries: BTreeMap<String, (CommentedString, PlistValue)>,
}

impl PlistDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value previously stored under the
    /// same key string.
    pub fn insert(
        &mut self,
        key: impl Into<CommentedString>,
        value: PlistValue,
    ) -> Option<PlistValue> {
        let key = key.into();
        self.entries
            .insert(key.string.clone(), (key, value))
            .map(|(_, old)| old)
    }

    /// Insert only when `value` is present.
    pub fn insert_opt(&mut self, key: impl Into<CommentedString>, value: Option<PlistValue>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.get(key).map(|(_, v)| v)
    }

    /// The stored key for `key`, including its comment.
    pub fn key(&self, key: &str) -> Option<&CommentedString> {
        self.entries.get(key).map(|(k, _)| k)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CommentedString, &PlistValue)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    /// Entries in rendering order: `isa` first, then lexicographic.
    pub fn iter_rendered(&self) -> impl Iterator<Item = (&CommentedString, &PlistValue)> {
        let isa = self.entries.get("isa").map(|(k, v)| (k, v));
        isa.into_iter().chain(
            self.entries
                .iter()
                .filter(|(k, _)| k.as_str() != "isa")
                .map(|(_, (k, v))| (k, v)),
        )
    }
}

impl FromIterator<(CommentedString, PlistValue)> for PlistDictionary {
    fn from_iter<T: IntoIterator<Item = (CommentedString, PlistValue)>>(iter: T) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_dedupe_on_string_only() {
        let mut dict = PlistDictionary::new();
        dict.insert(CommentedString::with_comment("A", "first"), PlistValue::string("1"));
        let old = dict.insert(CommentedString::with_comment("A", "second"), PlistValue::string("2"));
        assert_eq!(old, Some(PlistValue::string("1")));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("A"), Some(&PlistValue::string("2")));
        assert_eq!(dict.key("A").unwrap().comment.as_deref(), Some("second"));
    }

    #[test]
    fn rendered_order_puts_isa_first() {
        let dict: PlistDictionary = ["sourceTree", "isa", "name"]
            .into_iter()
            .map(|k| (CommentedString::new(k), PlistValue::string("v")))
            .collect();
        let keys: Vec<_> = dict.iter_rendered().map(|(k, _)| k.string.as_str()).collect();
        assert_eq!(keys, vec!["isa", "name", "sourceTree"]);
    }

    #[test]
    fn rendered_order_without_isa() {
        let dict: PlistDictionary = ["b", "a"]
            .into_iter()
            .map(|k| (CommentedString::new(k), PlistValue::string("v")))
            .collect();
        let keys: Vec<_> = dict.iter_rendered().map(|(k, _)| k.string.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn insert_opt_skips_none() {
        let mut dict = PlistDictionary::new();
        dict.insert_opt("a", None);
        dict.insert_opt("b", Some(PlistValue::string("x")));
        assert!(!dict.contains_key("a"));
        assert!(dict.contains_key("b"));
    }

    #[test]
    fn from_raw_value() {
        let raw = RawValue::Dictionary(BTreeMap::from([
            ("n".to_string(), RawValue::Integer(3)),
            ("l".to_string(), RawValue::Array(vec![RawValue::from("x")])),
        ]));
        let value = PlistValue::from(&raw);
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.get("n"), Some(&PlistValue::string("3")));
        assert_eq!(dict.get("l").and_then(|v| v.as_array()).map(|a| a.len()), Some(1));
    }

    #[test]
    fn strings_helper() {
        let v = PlistValue::strings(["a", "b"]);
        assert_eq!(v.as_array().unwrap()[1].as_string().unwrap().string, "b");
    }
}

use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter, Keys, Values};

use crate::Value;

/// An ordered, key-unique association of strings to values.
///
/// Iteration yields entries in insertion order, which is also the order they
/// are written in. Replacing the value of an existing key keeps the key at its
/// original position.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key, keeping the remaining entries in order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, String, Value> {
        self.entries.values()
    }
}

// `IndexMap` equality ignores order; two mappings are only equal here when
// their entries line up pairwise.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Mapping;
    use crate::Value;

    #[test]
    fn test_insertion_order() {
        let mut m = Mapping::new();
        m.insert("Name", "John Doe");
        m.insert("City of Birth", "Springfield");
        m.insert("Year Of Birth", 1965);
        let keys: Vec<&str> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Name", "City of Birth", "Year Of Birth"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut m = Mapping::new();
        m.insert("Name", "A");
        m.insert("Other", 1);
        assert_eq!(m.insert("Name", "B"), Some(Value::string("A")));
        assert_eq!(m.len(), 2);
        assert_eq!(m.iter().next(), Some((&"Name".to_string(), &Value::string("B"))));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut m: Mapping = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(m.remove("b"), Some(Value::integer(2)));
        assert_eq!(m.remove("b"), None);
        let keys: Vec<&str> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
        let ba: Mapping = [("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}

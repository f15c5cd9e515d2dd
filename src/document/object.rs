use std::fmt;

use hashbrown::HashMap;

use crate::document::Document;

// -----------------------------------------------------------------------------
// DocumentObject

/// An insertion-ordered string-keyed mapping of [`Document`] nodes.
///
/// Keys keep the order in which they were first inserted. Inserting an
/// existing key replaces the value in place without moving the key — the
/// last write wins, the position does not change.
///
/// # Examples
///
/// ```
/// use docbind::{Document, document::DocumentObject};
///
/// let mut object = DocumentObject::new();
/// object.insert("id", Document::from(1_u64));
/// object.insert("name", Document::from("a"));
/// object.insert("id", Document::from(2_u64));
///
/// let keys: Vec<&str> = object.keys().collect();
/// assert_eq!(keys, ["id", "name"]);
/// assert_eq!(object.get("id"), Some(&Document::from(2_u64)));
/// ```
#[derive(Clone, Default)]
pub struct DocumentObject {
    values: Vec<Document>,
    keys: Vec<String>,
    indices: HashMap<String, usize>,
}

impl DocumentObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            keys: Vec::new(),
            indices: HashMap::new(),
        }
    }

    /// Creates an empty object with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity(capacity),
        }
    }

    /// Sets `key` to `value`.
    ///
    /// Returns the replaced value if the key was already present; the key
    /// keeps its original position in that case.
    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
        let key: String = key.into();
        if let Some(&index) = self.indices.get(&key) {
            Some(std::mem::replace(&mut self.values[index], value))
        } else {
            self.indices.insert(key.clone(), self.values.len());
            self.keys.push(key);
            self.values.push(value);
            None
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.indices.get(key).map(|&index| &self.values[index])
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.indices
            .get(key)
            .map(|&index| &mut self.values[index])
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the object has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// An iterator over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// An iterator over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Document> {
        self.values.iter()
    }

    /// An iterator over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Document)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl PartialEq for DocumentObject {
    /// Order-sensitive comparison: equal objects hold the same entries in
    /// the same insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl fmt::Debug for DocumentObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Document)> for DocumentObject {
    fn from_iter<T: IntoIterator<Item = (K, Document)>>(entries: T) -> Self {
        let mut object = DocumentObject::new();
        for (key, value) in entries {
            object.insert(key, value);
        }
        object
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::DocumentObject;
    use crate::Document;

    #[test]
    fn insertion_order_preserved() {
        let mut object = DocumentObject::new();
        object.insert("b", Document::from(1_u64));
        object.insert("a", Document::from(2_u64));
        object.insert("c", Document::from(3_u64));

        let keys: Vec<&str> = object.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn last_write_wins_in_place() {
        let mut object = DocumentObject::new();
        object.insert("a", Document::from(1_u64));
        object.insert("b", Document::from(2_u64));

        let replaced = object.insert("a", Document::from(9_u64));
        assert_eq!(replaced, Some(Document::from(1_u64)));

        let keys: Vec<&str> = object.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(object.get("a"), Some(&Document::from(9_u64)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: DocumentObject = [("a", Document::Null), ("b", Document::Null)]
            .into_iter()
            .collect();
        let ba: DocumentObject = [("b", Document::Null), ("a", Document::Null)]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);
    }
}

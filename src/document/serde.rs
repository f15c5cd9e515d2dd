//! `serde` data-model impls for the document tree.
//!
//! These are the crate's only boundary with text: a serde format crate
//! (e.g. `serde_json`) renders a [`Document`] to wire bytes and parses
//! them back. Duplicate keys in parsed input resolve last-write-wins via
//! [`DocumentObject::insert`].

use std::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::document::number::Repr;
use crate::document::{Document, DocumentObject, Number};

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Repr::UInt(value) => serializer.serialize_u64(value),
            Repr::Int(value) => serializer.serialize_i64(value),
            Repr::Float(value) => serializer.serialize_f64(value),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Boolean(value) => serializer.serialize_bool(*value),
            Document::Number(value) => value.serialize(serializer),
            Document::String(value) => serializer.serialize_str(value),
            Document::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any document node")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Document, E> {
        Ok(Document::Boolean(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Document, E> {
        Ok(Document::Number(Number::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Document, E> {
        Ok(Document::Number(Number::from(value)))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Document, E> {
        Ok(Document::Number(Number::from(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Document, E> {
        Ok(Document::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Document, E> {
        Ok(Document::String(value))
    }

    fn visit_unit<E>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Document>()? {
            items.push(item);
        }
        Ok(Document::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut object = DocumentObject::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Document>()? {
            object.insert(key, value);
        }
        Ok(Document::Object(object))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::document::{Document, DocumentObject};

    #[test]
    fn renders_through_serde_json() {
        let mut object = DocumentObject::new();
        object.insert("id", Document::from(1_u64));
        object.insert("label", Document::from("a"));
        object.insert("tags", Document::Array(vec![Document::Null, Document::from(true)]));

        let text = serde_json::to_string(&Document::Object(object)).unwrap();
        assert_eq!(text, r#"{"id":1,"label":"a","tags":[null,true]}"#);
    }

    #[test]
    fn parses_through_serde_json() {
        let document: Document =
            serde_json::from_str(r#"{"a":-1,"b":[2.5],"c":null}"#).unwrap();
        let object = document.as_object().unwrap();
        assert_eq!(object.get("a").unwrap().as_i64(), Some(-1));
        assert_eq!(object.get("b").unwrap().as_array().unwrap()[0].as_f64(), Some(2.5));
        assert!(object.get("c").unwrap().is_null());
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let document: Document = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
        let object = document.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("a").unwrap().as_u64(), Some(2));
    }
}

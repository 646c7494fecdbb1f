//! Raw publication records as handed over by a record source.
//!
//! Records have no fixed schema. Profile dumps nest the bibliographic fields
//! under a `"bib"` object and keep link fields at the top level, while other
//! sources produce flat objects. [`Candidate`] addresses a value in either
//! shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the nested object holding bibliographic fields.
const BIB_KEY: &str = "bib";

/// A loosely-typed publication record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

/// Where to look for a field value inside a [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// A key of the nested `bib` object, or a top-level key when the record
    /// has no `bib` object.
    Bib(String),
    /// A top-level key.
    Record(String),
}

impl Candidate {
    pub fn bib(key: &str) -> Self {
        Candidate::Bib(key.to_string())
    }

    pub fn record(key: &str) -> Self {
        Candidate::Record(key.to_string())
    }
}

impl RawRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level value.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Sets a key of the nested `bib` object, creating it if needed.
    pub fn insert_bib(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let bib = self
            .fields
            .entry(BIB_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !bib.is_object() {
            *bib = Value::Object(Map::new());
        }
        if let Value::Object(bib) = bib {
            bib.insert(key.to_string(), value.into());
        }
        self
    }

    fn bib(&self) -> Option<&Map<String, Value>> {
        self.fields.get(BIB_KEY).and_then(Value::as_object)
    }

    /// Looks up the value a candidate points at.
    pub fn get(&self, candidate: &Candidate) -> Option<&Value> {
        match candidate {
            Candidate::Bib(key) => match self.bib() {
                Some(bib) => bib.get(key),
                None => self.fields.get(key),
            },
            Candidate::Record(key) => self.fields.get(key),
        }
    }

    /// Looks up a candidate and renders its value as text.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified and
    /// arrays of scalars are joined with `", "`. Nulls and objects count as
    /// missing.
    pub fn text(&self, candidate: &Candidate) -> Option<String> {
        self.get(candidate).and_then(value_to_text)
    }

    /// Names of the bibliographic keys available in this record.
    pub fn keys(&self) -> Vec<&str> {
        self.bib()
            .unwrap_or(&self.fields)
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// Returns true when the record carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_to_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

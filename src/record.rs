use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered field map used for records and run metadata.
pub type FieldMap = IndexMap<String, serde_json::Value>;

/// A single parsed unit of output: an open-ended mapping from field name to
/// value. Field order is preserved as produced by the parser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct Record {
    pub fields: FieldMap,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl From<FieldMap> for Record {
    fn from(fields: FieldMap) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, serde_json::Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

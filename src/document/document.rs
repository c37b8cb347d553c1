//! Document structure.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{RankError, Result};

/// Field holding the article headline.
pub const TITLE_FIELD: &str = "title";

/// Field holding the article body.
pub const CONTENT_FIELD: &str = "content";

/// Field added by preprocessing.
pub const PROCESSED_TEXT_FIELD: &str = "processed_text";

/// A single news article.
///
/// The document keeps every field of the JSON object it was read from, in
/// their original order, so writing it back only adds `processed_text`.
/// `title` and `content` are guaranteed to be strings.
#[derive(Clone, PartialEq)]
pub struct Document {
    doc_id: usize,
    fields: Map<String, Value>,
}

impl Document {
    /// Create a document from a title and a content string.
    pub fn new<T: Into<String>, C: Into<String>>(title: T, content: C) -> Self {
        let mut fields = Map::new();
        fields.insert(TITLE_FIELD.to_string(), Value::String(title.into()));
        fields.insert(CONTENT_FIELD.to_string(), Value::String(content.into()));
        Document { doc_id: 0, fields }
    }

    /// Build a document from a parsed JSON value.
    ///
    /// Fails when the value is not an object, when `title` or `content` is
    /// missing or not a string, or when `processed_text` is present but
    /// neither a string nor null.
    pub fn from_value(value: Value) -> Result<Self> {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(RankError::parse(format!(
                    "expected a JSON object, found {}",
                    json_type_name(&other)
                )));
            }
        };

        for required in [TITLE_FIELD, CONTENT_FIELD] {
            match fields.get(required) {
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(RankError::parse(format!(
                        "field `{required}` must be a string, found {}",
                        json_type_name(other)
                    )));
                }
                None => {
                    return Err(RankError::parse(format!("missing field `{required}`")));
                }
            }
        }

        match fields.get(PROCESSED_TEXT_FIELD) {
            None | Some(Value::String(_)) | Some(Value::Null) => {}
            Some(other) => {
                return Err(RankError::parse(format!(
                    "field `{PROCESSED_TEXT_FIELD}` must be a string, found {}",
                    json_type_name(other)
                )));
            }
        }

        Ok(Document { doc_id: 0, fields })
    }

    /// Add an extra field, replacing any previous value under that name.
    ///
    /// The typed fields cannot be overwritten through this method.
    pub fn with_field<S: Into<String>>(mut self, name: S, value: Value) -> Self {
        let name = name.into();
        if ![TITLE_FIELD, CONTENT_FIELD, PROCESSED_TEXT_FIELD].contains(&name.as_str()) {
            self.fields.insert(name, value);
        }
        self
    }

    /// Position of the document in its corpus.
    pub fn doc_id(&self) -> usize {
        self.doc_id
    }

    pub(crate) fn set_doc_id(&mut self, doc_id: usize) {
        self.doc_id = doc_id;
    }

    pub fn title(&self) -> &str {
        self.str_field(TITLE_FIELD).unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.str_field(CONTENT_FIELD).unwrap_or_default()
    }

    /// The normalized content, if the document has been preprocessed.
    pub fn processed_text(&self) -> Option<&str> {
        self.str_field(PROCESSED_TEXT_FIELD)
    }

    /// Store the normalized content.
    ///
    /// An existing `processed_text` keeps its position in the field order;
    /// otherwise the field is appended.
    pub fn set_processed_text<S: Into<String>>(&mut self, text: S) {
        self.fields
            .insert(PROCESSED_TEXT_FIELD.to_string(), Value::String(text.into()));
    }

    /// All fields in their original order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("doc_id", &self.doc_id)
            .field("title", &self.title())
            .field("processed", &self.processed_text().is_some())
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(value).map_err(D::Error::custom)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

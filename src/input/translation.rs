//! Translation document model loaded from a locale JSON file.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// Separator between segments of a dotted key path.
pub const KEY_SEPARATOR: char = '.';

/// A scalar JSON value stored in a translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

/// A value reachable from a [`TranslationDocument`].
///
/// Primitives and sequences are leaves; documents are descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Primitive(Primitive),
    Sequence(Vec<Self>),
    Document(TranslationDocument),
}

impl TranslationValue {
    /// Returns `true` unless the value is a nested document.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Document(_))
    }

    /// Shorthand for a text primitive.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Text(value.into()))
    }
}

impl From<Value> for TranslationValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Primitive(Primitive::Text(text)),
            Value::Number(number) => Self::Primitive(Primitive::Number(number)),
            Value::Bool(flag) => Self::Primitive(Primitive::Bool(flag)),
            Value::Null => Self::Primitive(Primitive::Null),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Document(TranslationDocument::from_map(map)),
        }
    }
}

impl From<&TranslationValue> for Value {
    fn from(value: &TranslationValue) -> Self {
        match value {
            TranslationValue::Primitive(Primitive::Text(text)) => Self::String(text.clone()),
            TranslationValue::Primitive(Primitive::Number(number)) => Self::Number(number.clone()),
            TranslationValue::Primitive(Primitive::Bool(flag)) => Self::Bool(*flag),
            TranslationValue::Primitive(Primitive::Null) => Self::Null,
            TranslationValue::Sequence(items) => {
                Self::Array(items.iter().map(Self::from).collect())
            }
            TranslationValue::Document(document) => Self::from(document),
        }
    }
}

/// Root (or nested) mapping of a locale file.
///
/// Key order follows the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationDocument {
    /// Top-level keys in file order.
    entries: IndexMap<String, TranslationValue>,
}

/// Why JSON text could not become a [`TranslationDocument`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Top-level value must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl TranslationDocument {
    /// Parses locale JSON text.
    ///
    /// # Examples
    /// ```
    /// use ejs_i18n_language_server::input::translation::{TranslationDocument, TranslationValue};
    ///
    /// let document = TranslationDocument::parse(r#"{"menu": {"title": "Home"}}"#).unwrap();
    /// assert_eq!(document.resolve("menu.title"), Some(&TranslationValue::text("Home")));
    /// assert_eq!(document.resolve("menu.missing"), None);
    /// ```
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str::<Value>(source)? {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(DocumentError::NotAnObject { found: json_kind(&other) }),
        }
    }

    /// Converts every value of a JSON object.
    fn from_map(map: serde_json::Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().map(|(key, value)| (key, TranslationValue::from(value))).collect(),
        }
    }

    /// Walks `path` one segment at a time.
    ///
    /// Returns `None` as soon as a segment is missing or the current value is not a document.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&TranslationValue> {
        let mut segments = path.split(KEY_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            let TranslationValue::Document(document) = current else {
                return None;
            };
            current = document.entries.get(segment)?;
        }

        Some(current)
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TranslationValue)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&TranslationDocument> for Value {
    fn from(document: &TranslationDocument) -> Self {
        Self::Object(
            document.entries.iter().map(|(key, value)| (key.clone(), Self::from(value))).collect(),
        )
    }
}

/// Name of a JSON value's type, for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

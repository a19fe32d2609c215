//! Payload codecs keyed by mime type.
//!
//! A [`CodecRegistry`] is an explicit value: create one, seed it with
//! [`with_builtins`](CodecRegistry::with_builtins) and hand it to whatever
//! needs to encode or decode payloads. Registrations on one registry are never
//! visible to another.
//!
//! The built-in codecs serialize values directly, so `application/json`
//! output is exactly what `serde_json` produces for the type. Codecs added
//! with [`register`](CodecRegistry::register) work on a [`serde_json::Value`]
//! tree instead.
//!
//! ```rust
//! use segroute::codec::{CodecRegistry, APPLICATION_JSON};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Student {
//!     id: u32,
//!     name: String,
//! }
//!
//! # fn main() -> Result<(), segroute::codec::CodecError> {
//! let codecs = CodecRegistry::with_builtins();
//! let student = Student { id: 7, name: "Ada".into() };
//!
//! let raw = codecs.encode(APPLICATION_JSON, &student)?;
//! let decoded: Student = codecs.decode(APPLICATION_JSON, &raw)?;
//! assert_eq!(decoded, student);
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The mime type of the built-in JSON codec.
pub const APPLICATION_JSON: &str = "application/json";

/// The mime type of the built-in XML codec.
pub const APPLICATION_XML: &str = "application/xml";

/// The mime type of the built-in plain text codec.
pub const TEXT_PLAIN: &str = "text/plain";

// Root element used when a value tree is written as XML.
const XML_ROOT: &str = "value";

/// Errors produced while encoding or decoding payloads.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CodecError {
    /// No codec is registered for the mime type.
    #[error("no codec registered for mime type '{0}'")]
    UnsupportedMimeType(String),
    /// The value could not be converted to or from its serialized form.
    #[error("serialization failed: {0}")]
    Serde(String),
    /// A text payload was not valid UTF-8.
    #[error("payload is not valid utf-8")]
    InvalidUtf8,
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serde(err.to_string())
    }
}

/// Converts payloads between bytes and a self-describing value tree.
pub trait Codec: Send + Sync {
    /// Serializes `value` into bytes.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Parses bytes back into a value.
    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError>;
}

/// A [`Codec`] built from a pair of functions.
///
/// ```rust
/// use segroute::codec::{CodecRegistry, FnCodec};
///
/// let mut codecs = CodecRegistry::new();
/// codecs.register(
///     "application/x-upper",
///     FnCodec::new(
///         |value| Ok(value.as_str().unwrap_or_default().to_uppercase().into_bytes()),
///         |raw| Ok(String::from_utf8_lossy(raw).into_owned().into()),
///     ),
/// );
///
/// assert_eq!(codecs.encode("application/x-upper", &"shout").unwrap(), b"SHOUT");
/// ```
pub struct FnCodec<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnCodec<E, D>
where
    E: Fn(&Value) -> Result<Vec<u8>, CodecError> + Send + Sync,
    D: Fn(&[u8]) -> Result<Value, CodecError> + Send + Sync,
{
    /// Creates a codec from an encoding and a decoding function.
    pub fn new(encode: E, decode: D) -> Self {
        FnCodec { encode, decode }
    }
}

impl<E, D> Codec for FnCodec<E, D>
where
    E: Fn(&Value) -> Result<Vec<u8>, CodecError> + Send + Sync,
    D: Fn(&[u8]) -> Result<Value, CodecError> + Send + Sync,
{
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        (self.encode)(value)
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        (self.decode)(raw)
    }
}

/// `application/json` via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// `application/xml` via `quick-xml`.
///
/// Through the registry, structs are written under an element named after
/// the type. A bare value tree has no type name and is written under
/// `<value>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        quick_xml::se::to_string_with_root(XML_ROOT, value)
            .map(String::into_bytes)
            .map_err(|err| CodecError::Serde(err.to_string()))
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        quick_xml::de::from_reader(raw).map_err(|err| CodecError::Serde(err.to_string()))
    }
}

/// `text/plain`: strings are written as-is, integers and booleans through
/// their textual form, floats with six decimals and anything else as compact
/// JSON. Decoding always yields a string.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextCodec;

impl Codec for TextCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let text = match scalar_text(value) {
            Some(text) => text,
            None => serde_json::to_string(value)?,
        };
        Ok(text.into_bytes())
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        let text = std::str::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;
        Ok(Value::String(text.to_owned()))
    }
}

// The plain text form of a scalar, `None` for arrays, objects and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| format!("{:.6}", f)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Clone)]
enum Entry {
    Json,
    Xml,
    Text,
    Custom(Arc<dyn Codec>),
}

impl Entry {
    fn codec(&self) -> Arc<dyn Codec> {
        match self {
            Entry::Json => Arc::new(JsonCodec),
            Entry::Xml => Arc::new(XmlCodec),
            Entry::Text => Arc::new(TextCodec),
            Entry::Custom(codec) => codec.clone(),
        }
    }
}

/// A table of codecs keyed by mime type.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Entry>,
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mime_types: Vec<_> = self.codecs.keys().collect();
        mime_types.sort();
        f.debug_struct("CodecRegistry")
            .field("mime_types", &mime_types)
            .finish()
    }
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the `application/json`,
    /// `application/xml` and `text/plain` codecs.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert(APPLICATION_JSON.to_owned(), Entry::Json);
        registry.insert(APPLICATION_XML.to_owned(), Entry::Xml);
        registry.insert(TEXT_PLAIN.to_owned(), Entry::Text);
        registry
    }

    /// Registers `codec` for `mime_type`, replacing any previous codec.
    pub fn register(&mut self, mime_type: impl Into<String>, codec: impl Codec + 'static) {
        self.insert(mime_type.into(), Entry::Custom(Arc::new(codec)));
    }

    fn insert(&mut self, mime_type: String, entry: Entry) {
        debug!(mime_type = %mime_type, "codec registered");
        self.codecs.insert(mime_type, entry);
    }

    /// Returns the codec registered for `mime_type`.
    pub fn get(&self, mime_type: &str) -> Option<Arc<dyn Codec>> {
        self.codecs.get(mime_type).map(Entry::codec)
    }

    /// Returns `true` if a codec is registered for `mime_type`.
    pub fn contains(&self, mime_type: &str) -> bool {
        self.codecs.contains_key(mime_type)
    }

    /// Encodes `value` with the codec for `mime_type`.
    ///
    /// Without a registered codec, string values are passed through as their
    /// UTF-8 bytes and anything else is an error.
    pub fn encode<T>(&self, mime_type: &str, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        match self.codecs.get(mime_type) {
            Some(Entry::Json) => Ok(serde_json::to_vec(value)?),
            Some(Entry::Xml) => quick_xml::se::to_string(value)
                .map(String::into_bytes)
                .map_err(|err| CodecError::Serde(err.to_string())),
            Some(Entry::Text) => {
                // numbers outside the value model fall through to `to_string`
                let scalar = serde_json::to_value(value)
                    .ok()
                    .as_ref()
                    .and_then(scalar_text);
                let text = match scalar {
                    Some(text) => text,
                    None => serde_json::to_string(value)?,
                };
                Ok(text.into_bytes())
            }
            Some(Entry::Custom(codec)) => codec.encode(&serde_json::to_value(value)?),
            None => match serde_json::to_value(value)? {
                Value::String(s) => Ok(s.into_bytes()),
                _ => Err(CodecError::UnsupportedMimeType(mime_type.to_owned())),
            },
        }
    }

    /// Encodes an already serialized payload.
    ///
    /// `text/plain` and mime types without a codec take the bytes unchanged;
    /// any other codec encodes them like [`encode`](CodecRegistry::encode).
    pub fn encode_bytes(&self, mime_type: &str, raw: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self.codecs.get(mime_type) {
            None | Some(Entry::Text) => Ok(raw.to_vec()),
            Some(_) => self.encode(mime_type, raw),
        }
    }

    /// Decodes `raw` with the codec for `mime_type`.
    pub fn decode<T>(&self, mime_type: &str, raw: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        match self.codecs.get(mime_type) {
            Some(Entry::Json) => Ok(serde_json::from_slice(raw)?),
            Some(Entry::Xml) => {
                quick_xml::de::from_reader(raw).map_err(|err| CodecError::Serde(err.to_string()))
            }
            Some(entry) => Ok(serde_json::from_value(entry.codec().decode(raw)?)?),
            None => Err(CodecError::UnsupportedMimeType(mime_type.to_owned())),
        }
    }
}

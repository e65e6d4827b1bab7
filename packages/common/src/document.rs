use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire shape of a remote document body: a flat JSON object, camelCase keys.
pub type Fields = Map<String, Value>;

/// One document as pushed by the remote collection capability.
///
/// Documents arrive untyped; they are validated into typed records at this
/// boundary and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode this document into a typed record, injecting the document id
    /// into the `id` field.
    pub fn decode<R: DeserializeOwned>(&self) -> Result<R, DocumentError> {
        let mut object = self.fields.clone();
        object.insert("id".into(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(object)).map_err(|source| DocumentError::Decode {
            id: self.id.clone(),
            source,
        })
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document {id} failed to decode: {source}")]
    Decode {
        id: String,
        source: serde_json::Error,
    },
    #[error("record did not serialize to an object")]
    NotAnObject,
}

/// A typed record stored in a named remote collection.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Sentinel key marking a field whose value is assigned by the backend at
/// write time.
pub const SERVER_TIMESTAMP_KEY: &str = "$serverTimestamp";

/// Placeholder for a server-assigned creation/update timestamp.
pub fn server_timestamp() -> Value {
    let mut marker = Map::new();
    marker.insert(SERVER_TIMESTAMP_KEY.into(), Value::Bool(true));
    Value::Object(marker)
}

/// Whether a field value is the server-timestamp placeholder.
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|o| o.len() == 1 && o.get(SERVER_TIMESTAMP_KEY).is_some())
}

/// Serialize a record-shaped value into wire fields, dropping any `id`: the
/// id travels outside the document body.
pub fn to_fields<T: serde::Serialize>(value: &T) -> Result<Fields, DocumentError> {
    let serialized = serde_json::to_value(value).map_err(|_| DocumentError::NotAnObject)?;
    match serialized {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        _ => Err(DocumentError::NotAnObject),
    }
}

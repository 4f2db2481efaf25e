use crate::decode::{self, Decode, DecodeError, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Top level JSON:API document returned by every shard endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<PrimaryData>,
    #[serde(default)]
    pub included: Vec<Value>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default)]
    pub links: Option<Value>,
    #[serde(default)]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<Value>),
    One(Value),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => write!(f, "{}: {}", title, detail),
            (Some(msg), None) | (None, Some(msg)) => write!(f, "{}", msg),
            (None, None) => write!(f, "unknown error"),
        }
    }
}

impl Response {
    /// The single primary resource of a `GET /{kind}/{id}` response.
    pub fn single(&self) -> decode::Result<&Value> {
        match &self.data {
            Some(PrimaryData::One(value)) => Ok(value),
            Some(PrimaryData::Many(_)) => Err(DecodeError::mismatch("data", "object")),
            None => Err(DecodeError::missing("data")),
        }
    }

    /// The primary resources of a collection response.
    pub fn many(&self) -> decode::Result<&[Value]> {
        match &self.data {
            Some(PrimaryData::Many(values)) => Ok(values),
            Some(PrimaryData::One(_)) => Err(DecodeError::mismatch("data", "array")),
            None => Err(DecodeError::missing("data")),
        }
    }

    pub fn decode_single<T: Decode>(&self) -> decode::Result<T> {
        T::decode(&Fields::new(self.single()?, "data")?)
    }

    pub fn decode_many<T: Decode>(&self) -> decode::Result<Vec<T>> {
        self.many()?
            .iter()
            .enumerate()
            .map(|(i, value)| T::decode(&Fields::new(value, format!("data[{}]", i))?))
            .collect()
    }
}

/// A `{ "type", "id" }` pointer from one resource to another.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Decode for ResourceRef {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
        })
    }
}

/// Reads `relationships.{name}.data` as a list of references.
pub(crate) fn to_many(relationships: &Fields<'_>, name: &str) -> decode::Result<Vec<ResourceRef>> {
    relationships.object(name)?.list("data")
}

/// Like [`to_many`], but an absent relationship or `null` data reads as empty.
pub(crate) fn opt_to_many(
    relationships: &Fields<'_>,
    name: &str,
) -> decode::Result<Vec<ResourceRef>> {
    match relationships.opt_object(name)? {
        Some(rel) if rel.get("data").is_some() => rel.list("data"),
        _ => Ok(Vec::new()),
    }
}

/// Reads `relationships.{name}.data` as a single, possibly `null`, reference.
pub(crate) fn to_one(relationships: &Fields<'_>, name: &str) -> decode::Result<Option<ResourceRef>> {
    relationships
        .object(name)?
        .opt_object("data")?
        .map(|data| ResourceRef::decode(&data))
        .transpose()
}

//! Serde support for [`Tag`], in the shape handed to web pages:
//! `{"type": "int", "name": "x", "payload": 5}`.
use std::str::FromStr;

use serde::{
    de::{DeserializeOwned, Error as _},
    ser::SerializeStruct,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{from_value, Value};

use crate::{Payload, Tag, TagType};

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Tag", 3)?;
        state.serialize_field("type", self.discriminant())?;
        state.serialize_field("name", &self.name)?;
        match &self.payload {
            Payload::Byte(v) => state.serialize_field("payload", v)?,
            Payload::Short(v) => state.serialize_field("payload", v)?,
            Payload::Int(v) => state.serialize_field("payload", v)?,
            Payload::Long(v) => state.serialize_field("payload", v)?,
            // JSON has no numbers for these.
            Payload::Float(v) if !v.is_finite() => {
                state.serialize_field("payload", &v.to_string())?
            }
            Payload::Double(v) if !v.is_finite() => {
                state.serialize_field("payload", &v.to_string())?
            }
            Payload::Float(v) => state.serialize_field("payload", v)?,
            Payload::Double(v) => state.serialize_field("payload", v)?,
            Payload::ByteArray(v) => state.serialize_field("payload", v)?,
            Payload::String(v) => state.serialize_field("payload", v)?,
            Payload::List(v) => state.serialize_field("payload", v)?,
            Payload::Compound(v) => state.serialize_field("payload", v)?,
            Payload::IntArray(v) => state.serialize_field("payload", v)?,
            Payload::LongArray(v) => state.serialize_field("payload", v)?,
            Payload::Unknown(_) => state.serialize_field("payload", &())?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawTag {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    payload: Value,
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTag::deserialize(deserializer)?;
        let payload = match raw.kind.parse::<TagType>() {
            Ok(kind) => payload_from_value(kind, raw.payload).map_err(|e| {
                D::Error::custom(format!("invalid payload for {}: {}", kind, e))
            })?,
            // Kept rather than rejected, the renderer reports it.
            Err(()) => Payload::Unknown(raw.kind),
        };

        Ok(Tag {
            name: raw.name,
            payload,
        })
    }
}

fn payload_from_value(kind: TagType, value: Value) -> serde_json::Result<Payload> {
    Ok(match kind {
        TagType::Byte => Payload::Byte(from_value(value)?),
        TagType::Short => Payload::Short(from_value(value)?),
        TagType::Int => Payload::Int(from_value(value)?),
        TagType::Long => Payload::Long(from_value(value)?),
        TagType::Float => Payload::Float(float_from_value(value)?),
        TagType::Double => Payload::Double(float_from_value(value)?),
        TagType::ByteArray => Payload::ByteArray(from_value(value)?),
        TagType::String => Payload::String(from_value(value)?),
        TagType::List => Payload::List(from_value(value)?),
        TagType::Compound => Payload::Compound(from_value(value)?),
        TagType::IntArray => Payload::IntArray(from_value(value)?),
        TagType::LongArray => Payload::LongArray(from_value(value)?),
    })
}

/// A float payload is either a JSON number or one of the strings `NaN`, `inf`
/// and `-inf` written for non-finite values.
fn float_from_value<T>(value: Value) -> serde_json::Result<T>
where
    T: DeserializeOwned + FromStr,
{
    match value {
        Value::String(s) if matches!(s.as_str(), "NaN" | "inf" | "-inf") => s
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("invalid float {:?}", s))),
        value => from_value(value),
    }
}

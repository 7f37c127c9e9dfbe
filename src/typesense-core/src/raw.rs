use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Raw JSON kept as received, decoded only when asked for.
///
/// Search hits carry documents whose shape is defined by the caller's
/// collection schema, so the client stores the serialized text and leaves
/// decoding to [`RawJson::decode`] or [`RawJson::to_map`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJson(Box<str>);

impl RawJson {
    /// True when no payload was present in the response.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw JSON text.
    pub fn get(&self) -> &str {
        &self.0
    }

    /// Decode into `T`. An empty payload decodes as JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        if self.is_empty() {
            return serde_json::from_str("null");
        }
        serde_json::from_str(&self.0)
    }

    /// Decode into a generic key-value map. An empty or `null` payload gives
    /// an empty map.
    pub fn to_map(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        if self.is_empty() || self.is_null() {
            return Ok(serde_json::Map::new());
        }
        serde_json::from_str(&self.0)
    }

    fn is_null(&self) -> bool {
        self.0.trim() == "null"
    }
}

impl From<String> for RawJson {
    fn from(s: String) -> Self {
        Self(s.into_boxed_str())
    }
}

impl From<&str> for RawJson {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl<'de> Deserialize<'de> for RawJson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self(raw.get().into()))
    }
}

impl Serialize for RawJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_empty() {
            return serializer.serialize_unit();
        }
        let raw = RawValue::from_string(self.0.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

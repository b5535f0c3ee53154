//! Conversion between identification JSON and the typed model
//!
//! Every field is read explicitly so a malformed response reports exactly
//! which field was missing or had the wrong shape. Unknown fields are
//! ignored.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::error::MappingError;
use crate::types::*;

type MapResult<T> = std::result::Result<T, MappingError>;

/// A JSON object together with its location in the document
struct Object<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Object<'a> {
    fn new(value: &'a Value, path: String) -> MapResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            _ => Err(MappingError::WrongType {
                path: if path.is_empty() { "$".to_string() } else { path },
                expected: "an object",
            }),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> MappingError {
        MappingError::WrongType {
            path: self.path_of(key),
            expected,
        }
    }

    fn required(&self, key: &str) -> MapResult<&'a Value> {
        self.map.get(key).ok_or_else(|| MappingError::Missing {
            path: self.path_of(key),
        })
    }

    /// Absent and explicit `null` are both treated as "not set"
    fn optional(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn string(&self, key: &str) -> MapResult<String> {
        self.required(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(key, "a string"))
    }

    fn number(&self, key: &str) -> MapResult<f64> {
        self.required(key)?
            .as_f64()
            .ok_or_else(|| self.wrong_type(key, "a number"))
    }

    fn optional_number(&self, key: &str) -> MapResult<Option<f64>> {
        self.optional(key)
            .map(|v| v.as_f64().ok_or_else(|| self.wrong_type(key, "a number")))
            .transpose()
    }

    fn optional_integer(&self, key: &str) -> MapResult<Option<i64>> {
        self.optional(key)
            .map(|v| v.as_i64().ok_or_else(|| self.wrong_type(key, "an integer")))
            .transpose()
    }

    fn boolean(&self, key: &str) -> MapResult<bool> {
        self.required(key)?
            .as_bool()
            .ok_or_else(|| self.wrong_type(key, "a boolean"))
    }

    fn object(&self, key: &str) -> MapResult<Object<'a>> {
        Object::new(self.required(key)?, self.path_of(key))
    }

    fn optional_map(&self, key: &str) -> MapResult<Option<Map<String, Value>>> {
        self.optional(key)
            .map(|v| {
                v.as_object()
                    .cloned()
                    .ok_or_else(|| self.wrong_type(key, "an object"))
            })
            .transpose()
    }

    fn array(&self, key: &str) -> MapResult<&'a Vec<Value>> {
        self.required(key)?
            .as_array()
            .ok_or_else(|| self.wrong_type(key, "an array"))
    }

    fn strings(&self, key: &str) -> MapResult<Vec<String>> {
        let base = self.path_of(key);
        self.array(key)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| MappingError::WrongType {
                        path: format!("{}[{}]", base, i),
                        expected: "a string",
                    })
            })
            .collect()
    }

    /// Map every element of an array of objects, keeping order
    fn objects<T>(&self, key: &str, f: impl Fn(&Object<'a>) -> MapResult<T>) -> MapResult<Vec<T>> {
        let base = self.path_of(key);
        self.array(key)?
            .iter()
            .enumerate()
            .map(|(i, v)| f(&Object::new(v, format!("{}[{}]", base, i))?))
            .collect()
    }

    fn optional_objects<T>(
        &self,
        key: &str,
        f: impl Fn(&Object<'a>) -> MapResult<T>,
    ) -> MapResult<Option<Vec<T>>> {
        match self.optional(key) {
            Some(_) => self.objects(key, f).map(Some),
            None => Ok(None),
        }
    }

    fn epoch(&self, key: &str) -> MapResult<DateTime<Utc>> {
        let secs = self.number(key)?;
        epoch_to_datetime(secs).ok_or_else(|| MappingError::InvalidValue {
            path: self.path_of(key),
            reason: format!("{} is not a representable timestamp", secs),
        })
    }

    fn iso_datetime(&self, key: &str) -> MapResult<DateTime<FixedOffset>> {
        let text = self.string(key)?;
        DateTime::parse_from_rfc3339(&text).map_err(|e| MappingError::InvalidValue {
            path: self.path_of(key),
            reason: format!("{:?} is not an ISO-8601 datetime ({})", text, e),
        })
    }
}

/// Epoch seconds (with fraction) to a UTC datetime, at microsecond precision
fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    let micros = (secs * 1_000_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

fn datetime_to_epoch(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_micros() as f64 / 1_000_000.0
}

/// ISO-8601 with `+HH:MM` offsets and microseconds only when non-zero
fn format_iso(dt: &DateTime<FixedOffset>) -> String {
    let precision = if dt.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    dt.to_rfc3339_opts(precision, false)
}

fn optional_f64(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::from)
}

impl Identification {
    /// Build the typed identification from the service's JSON response
    pub fn from_value(value: &Value) -> MapResult<Self> {
        Self::from_object(&Object::new(value, String::new())?)
    }

    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        let status_code = obj.string("status")?;
        let status =
            IdentificationStatus::from_code(&status_code).ok_or_else(|| MappingError::InvalidValue {
                path: obj.path_of("status"),
                reason: format!("unknown status {:?}", status_code),
            })?;

        Ok(Self {
            access_token: obj.string("access_token")?,
            model_version: obj.string("model_version")?,
            custom_id: obj.optional_integer("custom_id")?,
            input: Input::from_object(&obj.object("input")?)?,
            result: IdentificationResult::from_object(&obj.object("result")?)?,
            status,
            sla_compliant_client: obj.boolean("sla_compliant_client")?,
            sla_compliant_system: obj.boolean("sla_compliant_system")?,
            created: obj.epoch("created")?,
            completed: obj.epoch("completed")?,
        })
    }

    /// Convert back to the wire JSON shape
    pub fn to_value(&self) -> Value {
        json!({
            "access_token": self.access_token,
            "model_version": self.model_version,
            "custom_id": self.custom_id,
            "input": self.input.to_value(),
            "result": self.result.to_value(),
            "status": self.status.as_str(),
            "sla_compliant_client": self.sla_compliant_client,
            "sla_compliant_system": self.sla_compliant_system,
            "created": datetime_to_epoch(&self.created),
            "completed": datetime_to_epoch(&self.completed),
        })
    }
}

impl Input {
    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        Ok(Self {
            images: obj.strings("images")?,
            datetime: obj.iso_datetime("datetime")?,
            latitude: obj.optional_number("latitude")?,
            longitude: obj.optional_number("longitude")?,
            similar_images: obj.boolean("similar_images")?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "images": self.images,
            "datetime": format_iso(&self.datetime),
            "latitude": optional_f64(self.latitude),
            "longitude": optional_f64(self.longitude),
            "similar_images": self.similar_images,
        })
    }
}

impl IdentificationResult {
    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        Ok(Self {
            classification: Classification::from_object(&obj.object("classification")?)?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({ "classification": self.classification.to_value() })
    }
}

impl Classification {
    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        Ok(Self {
            suggestions: obj.objects("suggestions", Suggestion::from_object)?,
        })
    }

    pub fn to_value(&self) -> Value {
        let suggestions: Vec<Value> = self.suggestions.iter().map(Suggestion::to_value).collect();
        json!({ "suggestions": suggestions })
    }
}

impl Suggestion {
    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        Ok(Self {
            id: obj.string("id")?,
            name: obj.string("name")?,
            probability: obj.number("probability")?,
            details: obj.optional_map("details")?,
            similar_images: obj.optional_objects("similar_images", SimilarImage::from_object)?,
        })
    }

    /// `details` and `similar_images` are left out when not set
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(self.id));
        map.insert("name".to_string(), json!(self.name));
        map.insert("probability".to_string(), json!(self.probability));
        if let Some(ref details) = self.details {
            map.insert("details".to_string(), Value::Object(details.clone()));
        }
        if let Some(ref images) = self.similar_images {
            map.insert(
                "similar_images".to_string(),
                Value::Array(images.iter().map(SimilarImage::to_value).collect()),
            );
        }
        Value::Object(map)
    }
}

impl SimilarImage {
    fn from_object(obj: &Object<'_>) -> MapResult<Self> {
        Ok(Self {
            id: obj.string("id")?,
            url: obj.string("url")?,
            url_small: obj.string("url_small")?,
            similarity: obj.number("similarity")?,
            license_name: obj.string("license_name")?,
            license_url: obj.string("license_url")?,
            citation: obj.string("citation")?,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "url": self.url,
            "url_small": self.url_small,
            "similarity": self.similarity,
            "license_name": self.license_name,
            "license_url": self.license_url,
            "citation": self.citation,
        })
    }
}

impl TryFrom<&Value> for Identification {
    type Error = MappingError;

    fn try_from(value: &Value) -> MapResult<Self> {
        Self::from_value(value)
    }
}

impl From<&Identification> for Value {
    fn from(identification: &Identification) -> Self {
        identification.to_value()
    }
}

//! Typed field access over raw JSON objects.
//!
//! Each accessor returns a [`ReadError`] instead of panicking or defaulting,
//! so it can be used directly as the body of a builder supplier.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ReadError, ReadResult};

/// A view over one JSON object of the source document.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(value: &'a Value) -> ReadResult<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| ReadError::NotAnObject(value_kind(value)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.get(name).is_some_and(|value| !value.is_null())
    }

    /// Field `name` converted to `T`; missing or `null` is an error.
    pub fn required<T: DeserializeOwned>(&self, name: &str) -> ReadResult<T> {
        let value = self.value(name)?;
        convert(name, value)
    }

    /// Field `name` converted to `T`; missing or `null` yields `None`.
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> ReadResult<Option<T>> {
        match self.map.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(name, value).map(Some),
        }
    }

    /// Field `name` converted to `T`; missing or `null` yields `default`.
    pub fn optional_or<T: DeserializeOwned>(&self, name: &str, default: T) -> ReadResult<T> {
        Ok(self.optional(name)?.unwrap_or(default))
    }

    pub fn object(&self, name: &str) -> ReadResult<Fields<'a>> {
        let value = self.value(name)?;
        value
            .as_object()
            .map(|map| Fields { map })
            .ok_or_else(|| shape_error(name, "an object", value))
    }

    pub fn optional_object(&self, name: &str) -> ReadResult<Option<Fields<'a>>> {
        if self.contains(name) {
            self.object(name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn array(&self, name: &str) -> ReadResult<&'a [Value]> {
        let value = self.value(name)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| shape_error(name, "an array", value))
    }

    /// Like [`array`](Self::array), but a missing field is an empty slice.
    pub fn optional_array(&self, name: &str) -> ReadResult<&'a [Value]> {
        if self.contains(name) {
            self.array(name)
        } else {
            Ok(&[])
        }
    }

    pub fn entries(&self, name: &str) -> ReadResult<&'a Map<String, Value>> {
        let value = self.value(name)?;
        value
            .as_object()
            .ok_or_else(|| shape_error(name, "an object", value))
    }

    /// Like [`entries`](Self::entries), but a missing field has no entries.
    pub fn optional_entries(&self, name: &str) -> ReadResult<Option<&'a Map<String, Value>>> {
        if self.contains(name) {
            self.entries(name).map(Some)
        } else {
            Ok(None)
        }
    }

    fn value(&self, name: &str) -> ReadResult<&'a Value> {
        match self.map.get(name) {
            None | Some(Value::Null) => Err(ReadError::MissingField(name.to_string())),
            Some(value) => Ok(value),
        }
    }
}

fn convert<T: DeserializeOwned>(name: &str, value: &Value) -> ReadResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| ReadError::InvalidField {
        field: name.to_string(),
        message: e.to_string(),
    })
}

fn shape_error(name: &str, expected: &'static str, found: &Value) -> ReadError {
    ReadError::UnexpectedShape {
        field: name.to_string(),
        expected,
        found: value_kind(found),
    }
}

/// JSON type name of `value`, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_of_rejects_non_objects() {
        let value = json!([1, 2]);
        assert!(matches!(Fields::of(&value), Err(ReadError::NotAnObject("array"))));
    }

    #[test]
    fn test_required_and_optional() {
        let value = json!({"id": 3, "name": null, "locked": "yes"});
        let fields = Fields::of(&value).unwrap();

        assert_eq!(fields.required::<i32>("id").unwrap(), 3);
        assert!(matches!(
            fields.required::<String>("name"),
            Err(ReadError::MissingField(_))
        ));
        assert_eq!(fields.optional::<String>("name").unwrap(), None);
        assert_eq!(fields.optional::<String>("absent").unwrap(), None);
        assert_eq!(fields.optional_or("absent", 7).unwrap(), 7);
        assert_eq!(fields.optional_or("id", 7).unwrap(), 3);
        assert!(matches!(
            fields.optional::<bool>("locked"),
            Err(ReadError::InvalidField { field, .. }) if field == "locked"
        ));
    }

    #[test]
    fn test_required_rejects_out_of_range() {
        let value = json!({"id": 5_000_000_000i64});
        let fields = Fields::of(&value).unwrap();
        assert!(fields.required::<i32>("id").is_err());
    }

    #[test]
    fn test_nested_object_and_shapes() {
        let value = json!({"bounds": {"width": 2}, "ports": "none", "nodes": {}});
        let fields = Fields::of(&value).unwrap();

        let bounds = fields.object("bounds").unwrap();
        assert_eq!(bounds.required::<i32>("width").unwrap(), 2);
        assert!(fields.optional_object("location").unwrap().is_none());
        assert!(matches!(
            fields.array("ports"),
            Err(ReadError::UnexpectedShape { expected: "an array", found: "string", .. })
        ));
        assert!(fields.optional_array("connections").unwrap().is_empty());
        assert!(fields.entries("nodes").unwrap().is_empty());
        assert!(fields.optional_entries("annotations").unwrap().is_none());
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!(1.5)), "number");
        assert_eq!(value_kind(&json!({})), "object");
    }
}

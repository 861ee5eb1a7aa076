use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation messages returned by the API on a rejected request, keyed by
/// field name. Non field errors end up under `detail` or
/// `non_field_errors`, whichever key the server used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ApiErrors {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ApiErrors {
    /// Parses an error response body leniently. Anything that is not a JSON
    /// object yields an empty set of errors.
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(object)) = serde_json::from_slice::<Value>(body)
        else {
            return Self::default();
        };

        let fields = object
            .into_iter()
            .map(|(field, value)| (field, messages(value)))
            .filter(|(_, messages)| !messages.is_empty())
            .collect();

        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

fn messages(value: Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message],
        Value::Array(values) => values.into_iter().flat_map(messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_errors() {
        let errors = ApiErrors::from_body(
            br#"{"password":["too short","too common"],"email":"taken"}"#,
        );

        assert_eq!(
            errors.get("password"),
            Some(&["too short".to_string(), "too common".to_string()][..])
        );
        assert_eq!(errors.get("email"), Some(&["taken".to_string()][..]));
    }

    #[test]
    fn non_object_body_is_empty() {
        assert!(ApiErrors::from_body(b"<html>502</html>").is_empty());
        assert!(ApiErrors::from_body(b"[\"nope\"]").is_empty());
        assert!(ApiErrors::from_body(b"").is_empty());
    }

    #[test]
    fn null_values_are_skipped() {
        let errors = ApiErrors::from_body(br#"{"detail":null}"#);

        assert!(errors.is_empty());
    }
}

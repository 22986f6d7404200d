//! Forgiving field decoders for model-generated JSON.
//!
//! The extraction model mostly follows its response schema, but not always:
//! codes show up as `"30"` or `30.0`, lists come back as `null`, a single
//! dish is occasionally a bare string. None of that may sink the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

/// Interpret a JSON value as an integer code.
pub fn code_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interpret a JSON value as text. Numbers are stringified.
pub fn string_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode each element of a JSON list on its own; elements that do not fit
/// are dropped. `null` and non-list values give an empty list.
pub fn list_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            warn!(value = %other, "expected a list, ignoring field");
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(v) => out.push(v),
            Err(e) => warn!(index = i, error = %e, "dropping malformed list entry"),
        }
    }
    out
}

/// The keys of one JSON object, read by name.
///
/// Each field is looked up under a list of accepted keys; the first one
/// present with a non-null value wins, the others are ignored. An object
/// carrying both the Italian key and its English alias therefore still
/// decodes.
#[derive(Debug, Default)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new(map: Map<String, Value>) -> Self {
        Fields(map)
    }

    pub fn take(&mut self, keys: &[&str]) -> Option<Value> {
        keys.iter()
            .filter_map(|k| self.0.remove(*k))
            .find(|v| !v.is_null())
    }

    pub fn string(&mut self, keys: &[&str]) -> Option<String> {
        self.take(keys).and_then(string_from_value)
    }

    pub fn code(&mut self, keys: &[&str]) -> Option<i64> {
        let value = self.take(keys)?;
        let code = code_from_value(&value);
        if code.is_none() {
            warn!(%value, "unreadable code, treating as absent");
        }
        code
    }

    pub fn list<T: DeserializeOwned>(&mut self, keys: &[&str]) -> Vec<T> {
        self.take(keys).map(list_from_value).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_forms() {
        assert_eq!(code_from_value(&json!(30)), Some(30));
        assert_eq!(code_from_value(&json!(30.0)), Some(30));
        assert_eq!(code_from_value(&json!(" 1189 ")), Some(1189));
        assert_eq!(code_from_value(&json!(2.5)), None);
        assert_eq!(code_from_value(&json!("n/d")), None);
        assert_eq!(code_from_value(&json!(null)), None);
        assert_eq!(code_from_value(&json!([1])), None);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(string_from_value(json!("100 gr")), Some("100 gr".to_string()));
        assert_eq!(string_from_value(json!(2)), Some("2".to_string()));
        assert_eq!(string_from_value(json!(true)), None);
        assert_eq!(string_from_value(json!(null)), None);
    }

    #[test]
    fn test_first_present_key_wins() {
        let Value::Object(map) = json!({"nome_piatto": "Pasta", "name": "Penne", "dish_name": null})
        else {
            unreachable!()
        };
        let mut f = Fields::new(map);
        assert_eq!(f.string(&["nome_piatto", "dish_name", "name"]).as_deref(), Some("Pasta"));

        let Value::Object(map) = json!({"nome_piatto": null, "name": "Penne"}) else {
            unreachable!()
        };
        let mut f = Fields::new(map);
        assert_eq!(f.string(&["nome_piatto", "dish_name", "name"]).as_deref(), Some("Penne"));
        assert_eq!(f.code(&["cad_code"]), None);
    }

    #[test]
    fn test_list_from_value() {
        let codes: Vec<i64> = list_from_value(json!([1, "x", 3]));
        assert_eq!(codes, vec![1, 3]);
        assert!(list_from_value::<i64>(json!(null)).is_empty());
        assert!(list_from_value::<i64>(json!("boh")).is_empty());
    }
}

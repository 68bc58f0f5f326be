//! Decoding of response payloads.
//!
//! Two decoders live here. [`decode_single`] pulls one named scalar out of an
//! object and insists on the exact JSON type. [`decode_records`] turns an array
//! of objects into typed records and is deliberately lenient: the server mixes
//! numbers and strings freely (`""` for zero, `"1"` for true), and varies key
//! casing between actions, so record fields go through [`FromLenient`] and keys
//! are matched case-insensitively through [`Fields`].

use std::collections::HashMap;

use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::error::DecodeError;

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'v>(value: &'v Value) -> Result<&'v Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::UnexpectedShape {
        expected: "object",
        found: json_kind(value),
    })
}

/// Truncate toward zero, or `None` when `f` does not fit an `i64`.
fn truncate_float(f: f64) -> Option<i64> {
    // i64::MAX is not representable, 2^63 is the first value out of range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f >= -LIMIT && f < LIMIT).then(|| f as i64)
}

/// Exact-type conversion for single-value results.
pub trait FromSingle: Sized {
    /// Name of the target type, for diagnostics
    const EXPECTED: &'static str;

    /// Convert, or `None` on a type mismatch.
    fn from_single(value: &Value) -> Option<Self>;
}

impl FromSingle for i64 {
    const EXPECTED: &'static str = "int";

    // Numbers arrive as floats; the fractional part is discarded.
    fn from_single(value: &Value) -> Option<Self> {
        let n = value.as_number()?;
        n.as_i64().or_else(|| n.as_f64().and_then(truncate_float))
    }
}

impl FromSingle for f64 {
    const EXPECTED: &'static str = "float";

    fn from_single(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromSingle for String {
    const EXPECTED: &'static str = "string";

    fn from_single(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromSingle for bool {
    const EXPECTED: &'static str = "bool";

    fn from_single(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// Extract the field `name` from a JSON object payload.
///
/// The field name must match exactly.
pub fn decode_single<T: FromSingle>(payload: &Value, name: &str) -> Result<T, DecodeError> {
    let obj = as_object(payload)?;
    let value = obj.get(name).ok_or_else(|| DecodeError::MissingField {
        name: name.into(),
        available: obj.keys().cloned().collect(),
    })?;
    T::from_single(value).ok_or_else(|| DecodeError::TypeMismatch {
        name: name.into(),
        expected: T::EXPECTED,
        found: value.to_string(),
    })
}

/// Weakly typed conversion used for record fields.
///
/// `null` decodes to the zero value. Arrays and objects never coerce.
pub trait FromLenient: Sized {
    /// Name of the target type, for diagnostics
    const EXPECTED: &'static str;

    /// Convert, or `None` when no coercion applies.
    fn from_lenient(value: &Value) -> Option<Self>;
}

fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0);
    }
    s.parse().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl FromLenient for i64 {
    const EXPECTED: &'static str = "int";

    fn from_lenient(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(0),
            Value::Bool(b) => Some(*b as i64),
            Value::Number(_) => i64::from_single(value),
            Value::String(s) => parse_int(s),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromLenient for f64 {
    const EXPECTED: &'static str = "float";

    fn from_lenient(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => Some(0.0),
            Value::String(s) => s.trim().parse().ok().filter(|f: &f64| f.is_finite()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromLenient for bool {
    const EXPECTED: &'static str = "bool";

    fn from_lenient(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(false),
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => parse_bool(s),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromLenient for String {
    const EXPECTED: &'static str = "string";

    fn from_lenient(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_owned()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromLenient for SmolStr {
    const EXPECTED: &'static str = "string";

    fn from_lenient(value: &Value) -> Option<Self> {
        String::from_lenient(value).map(SmolStr::from)
    }
}

impl<T: FromLenient> FromLenient for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_lenient(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_lenient(other).map(Some),
        }
    }
}

/// Case-insensitive view over the keys of one JSON object.
#[derive(Debug, Clone)]
pub struct Fields<'v> {
    by_key: HashMap<String, &'v Value>,
}

impl<'v> Fields<'v> {
    /// View `value`, which must be a JSON object.
    pub fn new(value: &'v Value) -> Result<Self, DecodeError> {
        let obj = as_object(value)?;
        let by_key = obj
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Ok(Self { by_key })
    }

    /// Raw value under `key`, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&'v Value> {
        self.by_key.get(&key.to_ascii_lowercase()).copied()
    }

    /// Coerce the value under `key`; a missing key yields the zero value.
    pub fn lenient<T: FromLenient + Default>(&self, key: &str) -> Result<T, DecodeError> {
        match self.get(key) {
            None => Ok(T::default()),
            Some(value) => T::from_lenient(value).ok_or_else(|| DecodeError::Coerce {
                key: key.into(),
                expected: T::EXPECTED,
                value: value.to_string(),
            }),
        }
    }
}

/// A typed record decoded from one JSON object.
///
/// Usually derived with `#[derive(Record)]` from the `linode-derive` crate.
pub trait Record: Sized {
    /// Build the record from a case-insensitive field view.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError>;
}

/// Decode one JSON object into a record.
pub fn decode_object<T: Record>(payload: &Value) -> Result<T, DecodeError> {
    T::from_fields(&Fields::new(payload)?)
}

/// Decode a JSON array of objects into records, preserving order.
pub fn decode_records<T: Record>(payload: &Value) -> Result<Vec<T>, DecodeError> {
    let items = payload.as_array().ok_or(DecodeError::UnexpectedShape {
        expected: "array",
        found: json_kind(payload),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_object(item).map_err(|e| DecodeError::Record {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Plan {
        id: i64,
        label: String,
        price: f64,
        managed: bool,
    }

    impl Record for Plan {
        fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
            Ok(Self {
                id: fields.lenient("PLANID")?,
                label: fields.lenient("LABEL")?,
                price: fields.lenient("PRICE")?,
                managed: fields.lenient("MANAGED")?,
            })
        }
    }

    #[test]
    fn single_values() {
        let data = json!({"LinodeID": 8098, "Label": "web", "Price": 10.5, "Ok": true, "Frac": 3.9});
        assert_eq!(decode_single::<i64>(&data, "LinodeID").unwrap(), 8098);
        assert_eq!(decode_single::<i64>(&data, "Frac").unwrap(), 3);
        assert_eq!(decode_single::<String>(&data, "Label").unwrap(), "web");
        assert_eq!(decode_single::<f64>(&data, "Price").unwrap(), 10.5);
        assert!(decode_single::<bool>(&data, "Ok").unwrap());
    }

    #[test]
    fn single_value_errors() {
        let data = json!({"JobID": "12"});
        assert!(matches!(
            decode_single::<i64>(&data, "JobID"),
            Err(DecodeError::TypeMismatch { .. })
        ));
        match decode_single::<i64>(&data, "JOBID") {
            Err(DecodeError::MissingField { available, .. }) => {
                assert_eq!(available, vec!["JobID".to_owned()])
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            decode_single::<i64>(&json!([1]), "JobID"),
            Err(DecodeError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn lenient_ints() {
        assert_eq!(i64::from_lenient(&json!("")), Some(0));
        assert_eq!(i64::from_lenient(&json!("130")), Some(130));
        assert_eq!(i64::from_lenient(&json!(2.5)), Some(2));
        assert_eq!(i64::from_lenient(&json!("-7")), Some(-7));
        assert_eq!(i64::from_lenient(&json!(true)), Some(1));
        assert_eq!(i64::from_lenient(&json!(null)), Some(0));
        assert_eq!(i64::from_lenient(&json!("abc")), None);
        assert_eq!(i64::from_lenient(&json!([1])), None);
    }

    #[test]
    fn lenient_rejects_lossy_values() {
        assert_eq!(i64::from_lenient(&json!("2.5")), None);
        assert_eq!(i64::from_lenient(&json!("1e300")), None);
        assert_eq!(i64::from_lenient(&json!(1e300)), None);
        assert_eq!(i64::from_lenient(&json!("9223372036854775808")), None);
        assert_eq!(bool::from_lenient(&json!("2")), None);
        assert_eq!(f64::from_lenient(&json!("inf")), None);
        assert_eq!(f64::from_lenient(&json!("NaN")), None);
        assert_eq!(f64::from_lenient(&json!("2.5")), Some(2.5));
        assert!(matches!(
            decode_single::<i64>(&json!({"Big": 1e300}), "Big"),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn lenient_bools() {
        assert_eq!(bool::from_lenient(&json!(1)), Some(true));
        assert_eq!(bool::from_lenient(&json!(0)), Some(false));
        assert_eq!(bool::from_lenient(&json!("1")), Some(true));
        assert_eq!(bool::from_lenient(&json!("")), Some(false));
        assert_eq!(bool::from_lenient(&json!("true")), Some(true));
        assert_eq!(bool::from_lenient(&json!("yes")), None);
    }

    #[test]
    fn lenient_strings() {
        assert_eq!(String::from_lenient(&json!(127)), Some("127".to_owned()));
        assert_eq!(String::from_lenient(&json!("130,")), Some("130,".to_owned()));
        assert_eq!(String::from_lenient(&json!(false)), Some("0".to_owned()));
        assert_eq!(String::from_lenient(&json!({})), None);
    }

    #[test]
    fn records_are_case_tolerant_and_lenient() {
        let data = json!([
            {"PLANID": 1, "LABEL": "Linode 1024", "PRICE": 10.0, "MANAGED": 1, "EXTRA": "x"},
            {"planid": "2", "Label": "Linode 2048", "price": "20", "managed": ""},
            {"PLANID": ""}
        ]);
        let plans: Vec<Plan> = decode_records(&data).unwrap();
        assert_eq!(
            plans,
            vec![
                Plan {
                    id: 1,
                    label: "Linode 1024".into(),
                    price: 10.0,
                    managed: true
                },
                Plan {
                    id: 2,
                    label: "Linode 2048".into(),
                    price: 20.0,
                    managed: false
                },
                Plan::default(),
            ]
        );
        // decoding the same payload again yields the same records
        assert_eq!(decode_records::<Plan>(&data).unwrap(), plans);
    }

    #[test]
    fn record_list_edges() {
        assert!(decode_records::<Plan>(&json!([])).unwrap().is_empty());
        assert!(matches!(
            decode_records::<Plan>(&json!({"PLANID": 1})),
            Err(DecodeError::UnexpectedShape { expected: "array", .. })
        ));
        match decode_records::<Plan>(&json!([{"PLANID": 1}, "nope"])) {
            Err(DecodeError::Record { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected: {other:?}"),
        }
        match decode_records::<Plan>(&json!([{"PLANID": [1]}])) {
            Err(DecodeError::Record { source, .. }) => {
                assert!(matches!(*source, DecodeError::Coerce { expected: "int", .. }))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}

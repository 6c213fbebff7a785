//! Conversions between [`Ubj`] and [`serde_json::Value`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use ubj::prelude::*;
//!
//! let doc = json!({"id": 7, "tags": ["a", "bc"], "ok": true});
//!
//! let value = Ubj::try_from(&doc).unwrap();
//! let enc = encode_full(&value).unwrap();
//! let dec = decode(&enc, Shape::Object).unwrap();
//!
//! assert_eq!(serde_json::Value::from(&dec), doc);
//! ```

use crate::{Ubj::*, *};
use bytes::Bytes;
use serde_json::{Number, Value};
use std::convert::TryFrom;

impl TryFrom<&Value> for Ubj {
    type Error = Error;

    /// Integers take the narrowest variant that holds them and fail outside the `i32`
    /// range. Other numbers become [`Ubj::Float32`], losing precision.
    fn try_from(v: &Value) -> Result<Ubj, Error> {
        Ok(match v {
            Value::Null => Null,
            Value::Bool(b) => Bool(*b),
            Value::Number(n) => number(n)?,
            Value::String(s) => Ubj::from(s.as_str()),
            Value::Array(a) => Array(a.iter().map(Ubj::try_from).collect::<Result<_, _>>()?),
            Value::Object(m) => Map(m
                .iter()
                .map(|(k, v)| Ok((Bytes::copy_from_slice(k.as_bytes()), Ubj::try_from(v)?)))
                .collect::<Result<_, Error>>()?),
        })
    }
}

fn number(n: &Number) -> Result<Ubj, Error> {
    if let Some(i) = n.as_i64() {
        Ubj::try_from(i)
    } else if let Some(u) = n.as_u64() {
        Ubj::try_from(u)
    } else {
        Ok(Float32(n.as_f64().unwrap_or_default() as f32))
    }
}

/// Strings and keys that are not UTF-8 are converted lossily. Non-finite floats become
/// `null`.
impl From<&Ubj> for Value {
    fn from(ks: &Ubj) -> Value {
        match ks {
            Null => Value::Null,
            Bool(b) => Value::Bool(*b),
            Float32(f) => Number::from_f64(*f as f64).map_or(Value::Null, Value::Number),
            Char(c) => Value::String(String::from_utf8_lossy(&[*c]).into_owned()),
            Str(s) => Value::String(String::from_utf8_lossy(s).into_owned()),
            Array(a) => Value::Array(a.iter().map(Value::from).collect()),
            Map(m) => Value::Object(
                m.iter()
                    .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), Value::from(v)))
                    .collect(),
            ),
            num => num.as_i64().map_or(Value::Null, Value::from),
        }
    }
}

//! # ubj
//!
//! A codec for a compact, UBJSON-style binary format. Values are written as a one-byte
//! tag followed by a fixed or length-prefixed payload, and structures are delimited by
//! open and close tags rather than prefixed with a count.
//!
//! # Usage
//!
//! The trait [`UbjRep`] is used to specify how data is converted into [`Ubj`].
//!
//! ```
//! use ubj::prelude::*;
//!
//! let numbers = vec![1u8, 2, 3];
//!
//! // encode
//! let encoded = encode_full(&numbers.to_ubj()).unwrap();
//! assert_eq!(encoded, b"[U\x01U\x02U\x03]");
//!
//! // and then immediately decode
//! let decoded: Vec<u8> = decode_as(&encoded, Shape::Array).unwrap();
//!
//! assert_eq!(numbers, decoded);
//! ```
//!
//! Objects can be decoded either into a [`VecMap`] or into an array of their values,
//! depending on the [`Shape`](config::Shape) requested.
//!
//! ```
//! use ubj::prelude::*;
//!
//! let mut fields = VecMap::new();
//! fields.insert(Bytes::from("a"), Ubj::from(1));
//!
//! let enc = encode_full(&Ubj::Map(fields.clone())).unwrap();
//! assert_eq!(enc, b"{CaU\x01}");
//!
//! assert_eq!(decode(&enc, Shape::Object).unwrap(), Ubj::Map(fields));
//! assert_eq!(decode(&enc, Shape::Array).unwrap(), Ubj::from(vec![1]));
//! ```
//!
//! # An overview of `Ubj` types
//!
//! ## Integers
//!
//! Integers are held in the variant matching their source type, but are always written
//! with the smallest tag that fits, so the variant does not survive a round trip.
//! Integers compare by value, so this is rarely visible.
//!
//! ```
//! use ubj::prelude::*;
//!
//! let small = Ubj::from(23i32);
//! assert_eq!(encode_full(&small).unwrap(), b"U\x17");
//!
//! // wider values need `TryFrom`
//! let wide = Ubj::try_from(-70_000i64).unwrap();
//! assert!(Ubj::try_from(1i64 << 40).is_err());
//! ```
//!
//! ## Strings
//!
//! Strings are byte sequences with no encoding attached. A one-byte string is written
//! with the `C` tag, and a string that looks like a decimal number with the `H` tag.
//!
//! ```
//! use ubj::prelude::*;
//!
//! assert_eq!(encode_full(&Ubj::from("x")).unwrap(), b"Cx");
//! assert_eq!(encode_full(&Ubj::from("42")).unwrap(), b"HU\x0242");
//! assert_eq!(encode_full(&Ubj::from("hi")).unwrap(), b"SU\x02hi");
//! ```
//!
//! # Format
//!
//! | Tag | Payload                              | Value            |
//! | --- | ---                                  | ---              |
//! | `Z` | none                                 | `null`           |
//! | `T` | none                                 | `true`           |
//! | `F` | none                                 | `false`          |
//! | `i` | 1 byte, signed                       | integer          |
//! | `U` | 1 byte, unsigned                     | integer          |
//! | `I` | 2 bytes, signed, little endian       | integer          |
//! | `l` | 4 bytes, signed, little endian       | integer          |
//! | `d` | 4 bytes, IEEE 754, little endian     | float            |
//! | `C` | 1 byte                               | one-byte string  |
//! | `S` | integer length, then that many bytes | string           |
//! | `H` | integer length, then that many bytes | numeric string   |
//! | `[` | values until `]`                     | array            |
//! | `{` | key, value pairs until `}`           | object           |
//!
//! The length of `S` and `H` strings is itself a tagged integer (`i`, `U`, `I` or `l`).
//! Object keys are written as strings. The tags `L`, `D` and `N` are reserved; the
//! encoder never writes them and the decoder rejects them.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod config;
pub mod encoding;
pub mod errors;
#[cfg(feature = "json")] pub mod json;
pub mod prelude;
pub mod rep;
pub mod util;
pub mod vecmap;

pub use errors::Error;

use bytes::Bytes;
use rep::UbjRep;
use std::convert::TryFrom;
use vecmap::*;

#[derive(Clone, Debug)]
/// [`Ubj`] and its variants.
///
/// # Example
///
/// ```
/// use ubj::prelude::*;
///
/// let b = Ubj::Bool(true);
///
/// let val = match b {
///     Ubj::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Ubj {
    /// Null. Corresponds to [`None`] and `()`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed byte.
    Int8(i8),
    /// Unsigned byte.
    UInt8(u8),
    /// 16-bit signed integer.
    Int16(i16),
    /// 32-bit signed integer.
    Int32(i32),
    /// Single-precision float.
    Float32(f32),
    /// A one-byte string.
    Char(u8),
    /// Byte string.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::{Ubj::Str, *};
    ///
    /// let s = Str(Bytes::from_static(b"hello world"));
    /// ```
    Str(Bytes),
    /// Array.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::{Ubj::Array, *};
    ///
    /// let arr = Array(vec![1, 2, 3, 4].into_iter().map(Ubj::from).collect());
    /// ```
    Array(Vec<Ubj>),
    /// Map, in insertion order.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::{Ubj::Map, *};
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from_static(b"hello world"), Ubj::from(1))]);
    ///
    /// let map = Map(vmap);
    /// ```
    Map(VecMap<Bytes, Ubj>),
}

use Ubj::*;

impl Ubj {
    /// Converts a byte string literal to [`Ubj`].
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::Ubj;
    ///
    /// let s = Ubj::from_static(b"this is an example");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Ubj { Str(Bytes::from_static(bytes)) }

    /// Indicates whether a value is `null`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::Ubj::Null;
    ///
    /// assert!(Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Returns the value of an integer variant, whatever its width.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::Ubj;
    ///
    /// assert_eq!(Ubj::Int16(-3).as_i64(), Some(-3));
    /// assert_eq!(Ubj::Float32(1.0).as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Int8(i) => Some(*i as i64),
            UInt8(i) => Some(*i as i64),
            Int16(i) => Some(*i as i64),
            Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Returns a float value.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the bytes of a string value. A [`Ubj::Char`] is one byte long.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::Ubj;
    ///
    /// assert_eq!(Ubj::Char(b'x').to_bytes().unwrap(), &b"x"[..]);
    /// assert_eq!(Ubj::from("xyz").to_bytes().unwrap(), &b"xyz"[..]);
    /// assert!(Ubj::Null.to_bytes().is_none());
    /// ```
    pub fn to_bytes(&self) -> Option<Bytes> {
        match self {
            Str(s) => Some(s.clone()),
            Char(c) => Some(Bytes::copy_from_slice(&[*c])),
            _ => None,
        }
    }

    /// Returns a [`bool`] value.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows the elements of an array.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::*;
    ///
    /// let ks = vec![1, 2, 3].into_ubj();
    ///
    /// assert_eq!(ks.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Option<&Vec<Ubj>> {
        match self {
            Array(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes an array, returning its elements.
    pub fn into_vec(self) -> Option<Vec<Ubj>> {
        match self {
            Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrows the entries of a map.
    pub fn to_map(&self) -> Option<&VecMap<Bytes, Ubj>> {
        match self {
            Map(m) => Some(m),
            _ => None,
        }
    }

    /// Consumes a map, returning its entries.
    pub fn into_map(self) -> Option<VecMap<Bytes, Ubj>> {
        match self {
            Map(m) => Some(m),
            _ => None,
        }
    }

    /// Consumes the value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::prelude::*;
    ///
    /// let num: u8 = Ubj::from(1).into_rep().unwrap();
    ///
    /// assert_eq!(num, 1);
    /// ```
    pub fn into_rep<T: UbjRep>(self) -> Option<T> { T::from_ubj(self) }

    /// Converts a scalar to the string it stands for as an object key.
    ///
    /// Strings are kept as they are, numbers are written in decimal, `true` becomes
    /// `"1"`, and `false` and `null` become the empty string. Containers cannot be keys
    /// and also map to the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::Ubj;
    ///
    /// assert_eq!(Ubj::Int16(-12).into_key(), "-12");
    /// assert_eq!(Ubj::Bool(true).into_key(), "1");
    /// assert_eq!(Ubj::Null.into_key(), "");
    /// ```
    pub fn into_key(self) -> Bytes {
        match self {
            Str(s) => s,
            Char(c) => Bytes::copy_from_slice(&[c]),
            Bool(true) => Bytes::from_static(b"1"),
            Float32(f) => Bytes::from(f.to_string()),
            Null | Bool(false) | Array(_) | Map(_) => Bytes::new(),
            num => match num.as_i64() {
                Some(i) => Bytes::from(i.to_string()),
                None => Bytes::new(),
            },
        }
    }

    fn as_str_bytes(&self) -> Option<&[u8]> {
        match self {
            Str(s) => Some(s),
            Char(c) => Some(std::slice::from_ref(c)),
            _ => None,
        }
    }
}

impl PartialEq for Ubj {
    fn eq(&self, other: &Ubj) -> bool {
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Float32(a), Float32(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => match (self.as_i64(), other.as_i64()) {
                (Some(a), Some(b)) => a == b,
                (None, None) => match (self.as_str_bytes(), other.as_str_bytes()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                },
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Ubj {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_map(m: &VecMap<Bytes, Ubj>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                map_string.push_str(&format!(
                    "{key}: {value}",
                    key = util::fmt_bytes(k),
                    value = fmt_helper(v, indent + 2),
                ));

                // last entry
                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(ks: &Ubj, indent: usize) -> String {
            match ks {
                Null => "null".to_owned(),
                Bool(b) => b.to_string(),
                Float32(float) => float.to_string(),
                Char(c) => util::fmt_bytes(std::slice::from_ref(c)),
                Str(bytes) => util::fmt_bytes(bytes),
                Array(a) => {
                    let items: Vec<String> = a.iter().map(|ks| fmt_helper(ks, indent)).collect();
                    format!("[{}]", items.join(", "))
                }
                Map(m) => fmt_map(m, indent),
                num => num.as_i64().map(|i| i.to_string()).unwrap_or_default(),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl From<&str> for Ubj {
    fn from(s: &str) -> Ubj { Str(Bytes::copy_from_slice(s.as_bytes())) }
}

impl From<u16> for Ubj {
    fn from(u: u16) -> Ubj {
        match i16::try_from(u) {
            Ok(i) => Int16(i),
            Err(_) => Int32(u as i32),
        }
    }
}

impl<T: Into<Ubj>> From<Vec<T>> for Ubj {
    fn from(v: Vec<T>) -> Ubj { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Ubj>> From<VecMap<Bytes, T>> for Ubj {
    fn from(v: VecMap<Bytes, T>) -> Ubj { Map(v.into_iter().map(|(k, v)| (k, v.into())).collect()) }
}

from_fn!(Ubj, bool, Bool);
from_fn!(Ubj, i8, Int8);
from_fn!(Ubj, u8, UInt8);
from_fn!(Ubj, i16, Int16);
from_fn!(Ubj, i32, Int32);
from_fn!(Ubj, f32, Float32);
from_fn!(Ubj, Bytes, Str);
from_fn!(Ubj, String, |s: String| Str(Bytes::from(s)));

/// Picks the narrowest variant holding `i`.
fn narrowest(i: i64) -> Result<Ubj, Error> {
    if let Ok(u) = u8::try_from(i) {
        Ok(UInt8(u))
    } else if let Ok(n) = i8::try_from(i) {
        Ok(Int8(n))
    } else if let Ok(n) = i16::try_from(i) {
        Ok(Int16(n))
    } else if let Ok(n) = i32::try_from(i) {
        Ok(Int32(n))
    } else {
        Err(Error::unrepresentable(i))
    }
}

try_from_fn!(Ubj, i64, narrowest);
try_from_fn!(Ubj, u32, |u: u32| narrowest(u as i64));
try_from_fn!(Ubj, u64, |u: u64| match i64::try_from(u) {
    Ok(i) => narrowest(i),
    Err(_) => Err(Error::unrepresentable(u)),
});
try_from_fn!(Ubj, usize, |u: usize| Ubj::try_from(u as u64));

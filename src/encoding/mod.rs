//! # Binary encoder and decoder
//!
//! Encode and decode functions for `ubj`.
//!
//! # Example
//!
//! ```
//! use ubj::prelude::*;
//!
//! // a value with some structure
//! let mut fields = VecMap::new();
//! fields.insert(Bytes::from("x"), Ubj::from(1));
//! fields.insert(Bytes::from("ys"), Ubj::from(vec![2, 300, -4]));
//! let value = Ubj::Map(fields);
//!
//! // encode it into a fresh buffer
//! let enc = encode_full(&value).unwrap();
//!
//! // or into one we already have
//! let out = &mut Vec::new();
//! encode(&value, out).unwrap();
//! assert_eq!(*out, enc);
//!
//! // objects come back as maps when asked to
//! let dec = decode(&enc, Shape::Object).unwrap();
//! assert_eq!(dec, value);
//!
//! // and as plain arrays of their values otherwise
//! let dec = decode(&enc, Shape::Array).unwrap();
//! assert_eq!(dec, Ubj::from(vec![Ubj::from(1), Ubj::from(vec![2, 300, -4])]));
//! ```

use crate::{
    config::*,
    errors::Error,
    rep::UbjRep,
    util,
    vecmap::VecMap,
    Ubj::{self, *},
};
use bytes::Bytes;
use std::convert::TryFrom;

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encodes `t` into `out` with the default [`Config`].
///
/// # Errors
///
/// Fails with [`Error::UnrepresentableNumber`] if an integer or string length is outside
/// the `i32` range, and with [`Error::DepthLimitExceeded`] on overly deep nesting. `out`
/// keeps whatever was written before the failure.
///
/// # Example
///
/// ```
/// use ubj::prelude::*;
///
/// let out = &mut Vec::new();
/// encode(&Ubj::Null, out).unwrap();
///
/// assert_eq!(out.as_slice(), b"Z");
/// ```
pub fn encode<T: Ser, S: Serializer>(t: T, out: &mut S) -> Result<(), Error> {
    t.ser(&mut Encoder::new(out, &Config::default()))
}

/// Encodes `t` into a new vector of bytes.
///
/// # Example
///
/// ```
/// use ubj::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Ubj::from("hello")).unwrap();
///
/// assert_eq!(enc, b"SU\x05hello");
/// ```
pub fn encode_full<T: Ser>(t: T) -> Result<Vec<u8>, Error> { encode_with(t, &Config::default()) }

/// Encodes `t` into a new vector of bytes using `config`.
pub fn encode_with<T: Ser>(t: T, config: &Config) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    t.ser(&mut Encoder::new(&mut out, config))?;
    Ok(out.finalize())
}

/// Decodes one value from `data`, with objects materialized according to `shape`.
///
/// Decoding is lenient about missing close tags: a structure still open when the input
/// ends is returned with the entries read so far. Empty input decodes to
/// [`Ubj::Null`], and bytes after the first complete value are ignored.
///
/// # Example
///
/// ```
/// use ubj::prelude::*;
///
/// // no closing `]`, but that's fine
/// let dec = decode(b"[U\x01", Shape::Array).unwrap();
/// assert_eq!(dec, Ubj::from(vec![1]));
///
/// // a missing payload byte is not
/// assert!(decode(b"[U", Shape::Array).is_err());
/// ```
pub fn decode(data: &[u8], shape: Shape) -> Result<Ubj, Error> {
    decode_with(Bytes::copy_from_slice(data), &Config::from(shape))
}

/// Decodes one value from `data` with the default [`Config`].
pub fn decode_full(data: &[u8]) -> Result<Ubj, Error> { decode(data, Shape::default()) }

/// Decodes one value from `data` using `config`. Strings in the result share `data`'s
/// buffer.
pub fn decode_with(data: Bytes, config: &Config) -> Result<Ubj, Error> {
    Parser::new(data, config).parse()
}

/// Decodes one value from `data` and converts it to `T`.
///
/// # Example
///
/// ```
/// use ubj::prelude::*;
///
/// let enc = encode_full(&vec![1u8, 2, 3].into_ubj()).unwrap();
/// let dec: Vec<u8> = decode_as(&enc, Shape::Array).unwrap();
///
/// assert_eq!(dec, vec![1, 2, 3]);
/// ```
pub fn decode_as<T: UbjRep>(data: &[u8], shape: Shape) -> Result<T, Error> {
    T::from_ubj(decode(data, shape)?).ok_or(Error::Conversion {
        expected: std::any::type_name::<T>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&'static str, Ubj)>) -> Ubj {
        Map(entries
            .into_iter()
            .map(|(k, v)| (Bytes::from(k), v))
            .collect())
    }

    #[test]
    fn constants() {
        assert_eq!(encode_full(&Null).unwrap(), b"Z");
        assert_eq!(encode_full(&Bool(true)).unwrap(), b"T");
        assert_eq!(encode_full(&Bool(false)).unwrap(), b"F");
    }

    #[test]
    fn zero_is_uint8() {
        let out = encode_full(&Ubj::from(0)).unwrap();

        // tag
        assert_eq!(out[0], UINT8);
        // payload
        assert_eq!(out[1], 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn minus_one_is_int16() {
        let out = encode_full(&Int8(-1)).unwrap();

        assert_eq!(out, [INT16, 0xff, 0xff]);
    }

    #[test]
    fn width_follows_value_not_variant() {
        assert_eq!(encode_full(&Int32(7)).unwrap(), [UINT8, 7]);
        assert_eq!(encode_full(&Int16(300)).unwrap(), [INT16, 0x2c, 0x01]);
        assert_eq!(
            encode_full(&Int32(70_000)).unwrap(),
            [INT32, 0x70, 0x11, 0x01, 0x00]
        );
    }

    #[test]
    fn single_float() {
        let out = encode_full(&Float32(1.0)).unwrap();

        // tag
        assert_eq!(out[0], FLOAT);
        // bytes
        assert_eq!(out[1..5], [0, 0, 0b1000_0000, 0b0011_1111]);

        let out = encode_full(&Float32(-0.0)).unwrap();
        assert_eq!(out[1..5], [0, 0, 0, 0b1_000_0000]);
    }

    #[test]
    fn one_byte_string_is_char() {
        let out = encode_full(&Ubj::from("a")).unwrap();

        assert_eq!(out, [CHAR, 0x61]);
        assert_eq!(encode_full(&Char(b'a')).unwrap(), out);
    }

    #[test]
    fn empty_string() {
        let out = encode_full(&Ubj::from("")).unwrap();

        // tag, length tag, length
        assert_eq!(out, [STRING, UINT8, 0]);
    }

    #[test]
    fn numeric_string_is_high_precision() {
        assert_eq!(encode_full(&Ubj::from("123")).unwrap(), b"HU\x03123");
        assert_eq!(encode_full(&Ubj::from("3.14")).unwrap(), b"HU\x043.14");
        assert_eq!(encode_full(&Ubj::from("12a")).unwrap(), b"SU\x0312a");

        let dec = decode_full(b"HU\x03123").unwrap();
        assert_eq!(dec, Str(Bytes::from_static(b"123")));
    }

    #[test]
    fn long_string_length_prefix() {
        let s = vec![b'w'; 300];
        let value = Ubj::from(Bytes::from(s.clone()));
        let out = encode_full(&value).unwrap();

        // tag
        assert_eq!(out[0], STRING);
        // length, as int16
        assert_eq!(out[1..4], [INT16, 0x2c, 0x01]);
        // bytes
        assert_eq!(out[4..].to_vec(), s);

        assert_eq!(decode_full(&out).unwrap(), value);

        // int32 length
        let value = Ubj::from(Bytes::from(vec![b'w'; 70_000]));
        let out = encode_full(&value).unwrap();
        assert_eq!(out[..6], [STRING, INT32, 0x70, 0x11, 0x01, 0x00]);
        assert_eq!(decode_full(&out).unwrap(), value);
    }

    #[test]
    fn array() {
        let out = encode_full(&Ubj::from(vec![1, 2])).unwrap();
        assert_eq!(out, b"[U\x01U\x02]");

        let dec = decode(&out, Shape::Array).unwrap();
        assert_eq!(dec, Ubj::from(vec![1, 2]));
    }

    #[test]
    fn object_shapes() {
        let value = map(vec![("a", Ubj::from(1))]);
        let out = encode_full(&value).unwrap();

        // open, char key, uint8 value, close
        assert_eq!(out, b"{Ca\x55\x01}");

        assert_eq!(decode(&out, Shape::Object).unwrap(), value);
        assert_eq!(decode(&out, Shape::Array).unwrap(), Ubj::from(vec![1]));
    }

    #[test]
    fn nested() {
        let value = map(vec![
            ("list", Ubj::from(vec![Ubj::from("xy"), Null, Bool(false)])),
            ("inner", map(vec![("k", Float32(2.5))])),
            ("empty", Array(vec![])),
        ]);
        let out = encode_full(&value).unwrap();
        assert_eq!(decode(&out, Shape::Object).unwrap(), value);
    }

    #[test]
    fn arrays_keep_shape_regardless_of_target() {
        let out = b"[[U\x01]{CaU\x02}]";
        assert_eq!(
            decode(out, Shape::Object).unwrap(),
            Array(vec![Ubj::from(vec![1]), map(vec![("a", Ubj::from(2))])])
        );
        assert_eq!(
            decode(out, Shape::Array).unwrap(),
            Array(vec![Ubj::from(vec![1]), Ubj::from(vec![2])])
        );
    }

    #[test]
    fn truncated() {
        assert_eq!(
            decode(b"[U", Shape::Array),
            Err(Error::TruncatedInput {
                offset: 2,
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn unterminated_structures() {
        assert_eq!(decode(b"[U\x01", Shape::Array).unwrap(), Ubj::from(vec![1]));
        assert_eq!(
            decode(b"{SU\x02abU\x01CbT", Shape::Object).unwrap(),
            map(vec![("ab", Ubj::from(1)), ("b", Bool(true))])
        );
        assert_eq!(
            decode(b"{CaU\x01Cb[T", Shape::Object).unwrap(),
            map(vec![("a", Ubj::from(1)), ("b", Array(vec![Bool(true)]))])
        );
        // a key with no value
        assert_eq!(
            decode(b"{Ca", Shape::Object).unwrap(),
            map(vec![("a", Null)])
        );
    }

    #[test]
    fn either_close_tag_ends_a_structure() {
        assert_eq!(decode(b"[U\x01}", Shape::Array).unwrap(), Ubj::from(vec![1]));
    }

    #[test]
    fn object_key_coercion() {
        let dec = decode(b"{U\x07TFZTCxd\x00\x00\xc0\x3fU\x01}", Shape::Object).unwrap();
        assert_eq!(
            dec,
            map(vec![
                ("7", Bool(true)),
                ("", Null),
                ("1", Char(b'x')),
                ("1.5", Ubj::from(1)),
            ])
        );
    }

    #[test]
    fn duplicate_keys_keep_last() {
        let dec = decode(b"{CaU\x01CbU\x02CaU\x03}", Shape::Object).unwrap();
        assert_eq!(dec, map(vec![("a", Ubj::from(3)), ("b", Ubj::from(2))]));
    }

    #[test]
    fn empty_and_trailing_input() {
        assert_eq!(decode_full(b"").unwrap(), Null);
        assert_eq!(decode_full(b"U\x01U\x02").unwrap(), Ubj::from(1));
        assert_eq!(decode_full(b"]").unwrap(), Null);
    }

    #[test]
    fn reserved_tags_fail() {
        assert!(decode_full(b"[L\x00\x00\x00\x00\x00\x00\x00\x01]").is_err());
        assert!(decode_full(b"D").is_err());
        assert_eq!(
            decode_full(b"[N]"),
            Err(Error::UnsupportedTag {
                tag: b'N',
                offset: 1
            })
        );
    }

    #[test]
    fn unrepresentable_integers() {
        assert_eq!(
            Ubj::try_from(1i64 << 31),
            Err(Error::UnrepresentableNumber {
                value: 2_147_483_648
            })
        );
        assert_eq!(
            encode_full(&Ubj::try_from(-(1i64 << 31)).unwrap()).unwrap(),
            [INT32, 0, 0, 0, 0x80]
        );
    }

    #[test]
    fn depth_limits() {
        let mut deep = Array(vec![]);
        for _ in 0..10 {
            deep = Array(vec![deep]);
        }
        let config = Config::new().max_depth(5);

        assert_eq!(
            encode_with(&deep, &config),
            Err(Error::DepthLimitExceeded { limit: 5 })
        );

        let enc = encode_full(&deep).unwrap();
        assert_eq!(
            decode_with(enc.clone().into(), &config),
            Err(Error::DepthLimitExceeded { limit: 5 })
        );
        assert_eq!(decode_full(&enc).unwrap(), deep);

        // hostile input is cut off rather than overflowing the stack
        let hostile = vec![b'['; 1_000_000];
        assert!(decode_full(&hostile).is_err());
    }

    #[test]
    fn bytes_mut_output() {
        let out = &mut bytes::BytesMut::new();
        encode(&Ubj::from(vec![1]), out).unwrap();
        assert_eq!(&out[..], b"[U\x01]");
    }

    #[test]
    fn typed_decode() {
        let enc = encode_full(&Ubj::from("hello")).unwrap();
        assert_eq!(decode_as::<String>(&enc, Shape::Array).unwrap(), "hello");
        assert!(matches!(
            decode_as::<bool>(&enc, Shape::Array),
            Err(Error::Conversion { .. })
        ));
    }
}

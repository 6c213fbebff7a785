use super::*;
use bytes::BytesMut;
use smallvec::SmallVec;

/// An output sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { bytes::BufMut::put_u8(self, u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// A tag byte followed by up to four payload bytes.
pub(crate) type IntRepr = SmallVec<[u8; 5]>;

/// Picks the tag for `i` and packs its payload.
///
/// Checks run in a fixed order: `U` for `[0, 256)`, then `I` for anything left that fits
/// in an `i16`, then `l` for anything that fits in an `i32`. Negative numbers therefore
/// never use the `i` tag; `-1` is written as `I`.
#[inline]
pub(crate) fn int_repr(i: i64) -> Result<IntRepr, Error> {
    let mut out = IntRepr::new();
    if (0..256).contains(&i) {
        out.push(UINT8);
        out.push(i as u8);
    } else if (i16::min_value() as i64..=i16::max_value() as i64).contains(&i) {
        out.push(INT16);
        out.extend_from_slice(&(i as i16).to_le_bytes());
    } else if (INT_MIN..INT_MAX_EXCL).contains(&i) {
        out.push(INT32);
        out.extend_from_slice(&(i as i32).to_le_bytes());
    } else {
        return Err(Error::unrepresentable(i));
    }
    Ok(out)
}

/// Scalar encoding methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add `null`.
    fn put_null(&mut self);

    /// Add a [`bool`].
    fn put_bool(&mut self, b: bool);

    /// Add an integer using the smallest tag the check order allows.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnrepresentableNumber`] outside the `i32` range; nothing is
    /// written in that case.
    fn put_int(&mut self, i: i64) -> Result<(), Error>;

    /// Add an [`f32`].
    fn put_f32(&mut self, f: f32);

    /// Add a single raw byte as a `C` value.
    fn put_char(&mut self, c: u8);

    /// Add a string. One-byte strings are written as `C`, strings that look like numbers
    /// as `H`, everything else as `S`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnrepresentableNumber`] if the length does not fit in an
    /// `i32`.
    fn put_str(&mut self, s: &[u8]) -> Result<(), Error>;
}

impl<S: Serializer> SerializerExt for S {
    fn put_null(&mut self) { self.put_u8(NULL) }

    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_u8(TRUE)
        } else {
            self.put_u8(FALSE)
        }
    }

    #[inline]
    fn put_int(&mut self, i: i64) -> Result<(), Error> {
        self.put_slice(&int_repr(i)?);
        Ok(())
    }

    fn put_f32(&mut self, f: f32) {
        self.put_u8(FLOAT);
        self.put_slice(&f.to_bits().to_le_bytes());
    }

    fn put_char(&mut self, c: u8) {
        self.put_u8(CHAR);
        self.put_u8(c);
    }

    fn put_str(&mut self, s: &[u8]) -> Result<(), Error> {
        if s.len() == 1 {
            self.put_char(s[0]);
            return Ok(());
        }

        let len = i64::try_from(s.len()).map_err(|_| Error::unrepresentable(s.len() as u64))?;
        let len = int_repr(len)?;

        self.put_u8(if util::is_numeric_str(s) {
            HIGH_PRECISION
        } else {
            STRING
        });
        self.put_slice(&len);
        self.put_slice(s);
        Ok(())
    }
}

/// Recursive encoder over a [`Serializer`], tracking container depth.
#[derive(Debug)]
pub struct Encoder<'a, S> {
    out: &'a mut S,
    max_depth: usize,
    depth: usize,
}

impl<'a, S: Serializer> Encoder<'a, S> {
    /// Creates an encoder writing into `out`.
    pub fn new(out: &'a mut S, config: &Config) -> Self {
        Encoder {
            out,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    /// Encodes one value, recursing into containers.
    pub fn encode_value(&mut self, ks: &Ubj) -> Result<(), Error> {
        match ks {
            Map(m) => return self.encode_map(m),
            Array(a) => return self.encode_array(a),
            Int8(i) => return self.out.put_int(*i as i64),
            UInt8(i) => return self.out.put_int(*i as i64),
            Int16(i) => return self.out.put_int(*i as i64),
            Int32(i) => return self.out.put_int(*i as i64),
            Str(s) => return self.out.put_str(s),
            Null => self.out.put_null(),
            Bool(b) => self.out.put_bool(*b),
            Float32(f) => self.out.put_f32(*f),
            Char(c) => self.out.put_char(*c),
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn encode_array(&mut self, a: &[Ubj]) -> Result<(), Error> {
        self.enter()?;
        self.out.put_u8(ARRAY_OPEN);
        for ks in a {
            self.encode_value(ks)?;
        }
        self.out.put_u8(ARRAY_CLOSE);
        self.depth -= 1;
        Ok(())
    }

    fn encode_map(&mut self, m: &VecMap<Bytes, Ubj>) -> Result<(), Error> {
        self.enter()?;
        self.out.put_u8(OBJECT_OPEN);
        for (k, v) in m.iter() {
            self.out.put_str(k)?;
            self.encode_value(v)?;
        }
        self.out.put_u8(OBJECT_CLOSE);
        self.depth -= 1;
        Ok(())
    }
}

/// A value that can be encoded.
pub trait Ser {
    /// Writes `self` through the encoder.
    fn ser<S: Serializer>(&self, e: &mut Encoder<S>) -> Result<(), Error>;
}

impl Ser for Ubj {
    fn ser<S: Serializer>(&self, e: &mut Encoder<S>) -> Result<(), Error> { e.encode_value(self) }
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer>(&self, e: &mut Encoder<S>) -> Result<(), Error> { (**self).ser(e) }
}

impl Ser for [Ubj] {
    fn ser<S: Serializer>(&self, e: &mut Encoder<S>) -> Result<(), Error> { e.encode_array(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_width_boundaries() {
        let cases: &[(i64, u8, usize)] = &[
            (0, UINT8, 2),
            (255, UINT8, 2),
            (256, INT16, 3),
            (32767, INT16, 3),
            (32768, INT32, 5),
            (INT_MAX_EXCL - 1, INT32, 5),
            (-1, INT16, 3),
            (-128, INT16, 3),
            (-32768, INT16, 3),
            (-32769, INT32, 5),
            (INT_MIN, INT32, 5),
        ];
        for &(i, tag, len) in cases {
            let repr = int_repr(i).unwrap();
            assert_eq!(repr[0], tag, "tag for {}", i);
            assert_eq!(repr.len(), len, "length for {}", i);
        }
    }

    #[test]
    fn int_out_of_range() {
        assert_eq!(
            int_repr(INT_MAX_EXCL),
            Err(Error::UnrepresentableNumber {
                value: 2_147_483_648
            })
        );
        assert!(int_repr(INT_MIN - 1).is_err());

        // nothing is written on failure
        let mut out = Vec::new();
        assert!(out.put_int(i64::max_value()).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn little_endian_payloads() {
        assert_eq!(int_repr(0x1234).unwrap().as_slice(), &[INT16, 0x34, 0x12]);
        assert_eq!(
            int_repr(-2).unwrap().as_slice(),
            &[INT16, 0xfe, 0xff]
        );
        assert_eq!(
            int_repr(0x0102_0304).unwrap().as_slice(),
            &[INT32, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn bytes_mut_sink() {
        let mut out = BytesMut::new();
        out.put_bool(true);
        out.put_str(b"ab").unwrap();
        assert_eq!(&out.finalize()[..], b"TSU\x02ab");
    }

    #[test]
    fn fixed_size_values() {
        let out = &mut Vec::new();
        let mut e = Encoder::new(out, &Config::default());
        for ks in &[Null, Bool(true), Bool(false), Float32(-2.0), Char(b'q')] {
            e.encode_value(ks).unwrap();
        }
        assert_eq!(out.as_slice(), b"ZTFd\x00\x00\x00\xc0Cq");
    }

    #[test]
    fn depth_limit() {
        let nested = Array(vec![Array(vec![Array(vec![])])]);
        let out = &mut Vec::new();

        let config = Config::new().max_depth(3);
        assert!(Encoder::new(out, &config).encode_value(&nested).is_ok());

        let config = Config::new().max_depth(2);
        assert_eq!(
            Encoder::new(&mut Vec::new(), &config).encode_value(&nested),
            Err(Error::DepthLimitExceeded { limit: 2 })
        );
    }
}

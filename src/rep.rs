//! Conversions between Rust values and [`Ubj`].

use crate::{vecmap::*, Ubj::*, *};
use bytes::Bytes;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::BuildHasher,
    vec::IntoIter,
};

/// A value representable as `Ubj`.
pub trait UbjRep: Clone + Sized {
    /// Converts value into `Ubj`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::rep::*;
    ///
    /// let num = 1i32.to_ubj();
    /// ```
    fn to_ubj(&self) -> Ubj { self.clone().into_ubj() }

    /// Consumes value, converting it into `Ubj`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::rep::*;
    ///
    /// let num = 1i32.into_ubj();
    /// ```
    fn into_ubj(self) -> Ubj { self.to_ubj() }

    /// Converts value from `Ubj`, returning `None` if `ks` does not hold a `Self`.
    ///
    /// # Example
    ///
    /// ```
    /// use ubj::rep::*;
    ///
    /// let s = "foo".to_string().into_ubj();
    ///
    /// assert_eq!(String::from_ubj(s).unwrap(), "foo");
    /// ```
    fn from_ubj(ks: Ubj) -> Option<Self>;
}

impl UbjRep for Ubj {
    fn into_ubj(self) -> Ubj { self }

    fn from_ubj(ks: Ubj) -> Option<Self> { Some(ks) }
}

impl UbjRep for bool {
    fn into_ubj(self) -> Ubj { Bool(self) }

    fn from_ubj(ks: Ubj) -> Option<Self> { ks.to_bool() }
}

impl UbjRep for f32 {
    fn into_ubj(self) -> Ubj { Float32(self) }

    fn from_ubj(ks: Ubj) -> Option<Self> { ks.as_f32() }
}

/// Integers are read from any integer variant whose value fits.
macro_rules! int_rep {
    ($($t:ty),*) => {
        $(
            impl UbjRep for $t {
                fn into_ubj(self) -> Ubj { Ubj::from(self) }

                fn from_ubj(ks: Ubj) -> Option<Self> {
                    <$t as TryFrom<i64>>::try_from(ks.as_i64()?).ok()
                }
            }
        )*
    };
}

int_rep!(i8, u8, i16, u16, i32);

impl UbjRep for Bytes {
    fn into_ubj(self) -> Ubj { Str(self) }

    fn from_ubj(ks: Ubj) -> Option<Self> { ks.to_bytes() }
}

impl UbjRep for String {
    fn into_ubj(self) -> Ubj { Str(Bytes::from(self)) }

    fn to_ubj(&self) -> Ubj { Str(Bytes::copy_from_slice(self.as_bytes())) }

    fn from_ubj(ks: Ubj) -> Option<Self> { String::from_utf8(ks.to_bytes()?.to_vec()).ok() }
}

impl UbjRep for () {
    fn into_ubj(self) -> Ubj { Null }

    fn from_ubj(ks: Ubj) -> Option<()> {
        if ks.is_null() {
            Some(())
        } else {
            None
        }
    }
}

impl<T: UbjRep> UbjRep for Option<T> {
    fn into_ubj(self) -> Ubj {
        match self {
            Some(x) => Array(vec![x.into_ubj()]),
            None => Null,
        }
    }

    fn to_ubj(&self) -> Ubj {
        match self {
            Some(x) => Array(vec![x.to_ubj()]),
            None => Null,
        }
    }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        match ks {
            Null => Some(None),
            Array(v) => {
                let mut iter = v.into_iter();
                let val = iter.next()?;
                if iter.next().is_none() {
                    Some(Some(T::from_ubj(val)?))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl<T: UbjRep> UbjRep for Vec<T> {
    fn into_ubj(self) -> Ubj { Array(self.into_iter().map(T::into_ubj).collect()) }

    fn to_ubj(&self) -> Ubj { Array(self.iter().map(T::to_ubj).collect()) }

    fn from_ubj(ks: Ubj) -> Option<Self> { ks.into_vec()?.into_iter().map(T::from_ubj).collect() }
}

impl<T: UbjRep> UbjRep for VecMap<Bytes, T> {
    fn into_ubj(self) -> Ubj { Map(self.into_iter().map(|(k, v)| (k, v.into_ubj())).collect()) }

    fn to_ubj(&self) -> Ubj { Map(self.iter().map(|(k, v)| (k.clone(), v.to_ubj())).collect()) }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        ks.into_map()?
            .into_iter()
            .map(|(k, v)| Some((k, T::from_ubj(v)?)))
            .collect()
    }
}

impl<T: UbjRep, S: BuildHasher + Default + Clone> UbjRep for HashMap<String, T, S> {
    fn into_ubj(self) -> Ubj {
        Map(self
            .into_iter()
            .map(|(k, v)| (Bytes::from(k), v.into_ubj()))
            .collect())
    }

    fn to_ubj(&self) -> Ubj {
        Map(self
            .iter()
            .map(|(k, v)| (Bytes::copy_from_slice(k.as_bytes()), v.to_ubj()))
            .collect())
    }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        ks.into_map()?
            .into_iter()
            .map(|(k, v)| Some((String::from_utf8(k.to_vec()).ok()?, T::from_ubj(v)?)))
            .collect()
    }
}

/// Integer-keyed maps. Keys `0..n` in order make an array; anything else is a map keyed
/// by the decimal form of each key.
impl<T: UbjRep> UbjRep for BTreeMap<i64, T> {
    fn into_ubj(self) -> Ubj {
        let contiguous = self.keys().zip(0..).all(|(k, i)| *k == i);
        if contiguous {
            Array(self.into_iter().map(|(_, v)| v.into_ubj()).collect())
        } else {
            Map(self
                .into_iter()
                .map(|(k, v)| (Bytes::from(k.to_string()), v.into_ubj()))
                .collect())
        }
    }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        match ks {
            Array(a) => a
                .into_iter()
                .zip(0..)
                .map(|(v, i)| Some((i, T::from_ubj(v)?)))
                .collect(),
            Map(m) => m
                .into_iter()
                .map(|(k, v)| {
                    let k = std::str::from_utf8(&k).ok()?.parse().ok()?;
                    Some((k, T::from_ubj(v)?))
                })
                .collect(),
            _ => None,
        }
    }
}

impl<A: UbjRep, B: UbjRep> UbjRep for (A, B) {
    fn into_ubj(self) -> Ubj { Array(vec![self.0.into_ubj(), self.1.into_ubj()]) }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        let iter = &mut ks.into_vec()?.into_iter();
        let out = (pop_ubj(iter)?, pop_ubj(iter)?);
        if iter.len() == 0 {
            Some(out)
        } else {
            None
        }
    }
}

impl<A: UbjRep, B: UbjRep, C: UbjRep> UbjRep for (A, B, C) {
    fn into_ubj(self) -> Ubj {
        Array(vec![
            self.0.into_ubj(),
            self.1.into_ubj(),
            self.2.into_ubj(),
        ])
    }

    fn from_ubj(ks: Ubj) -> Option<Self> {
        let iter = &mut ks.into_vec()?.into_iter();
        let out = (pop_ubj(iter)?, pop_ubj(iter)?, pop_ubj(iter)?);
        if iter.len() == 0 {
            Some(out)
        } else {
            None
        }
    }
}

/// Manually specify how the fields of a struct should be converted to `Ubj`. The struct
/// becomes an object with one entry per field.
///
/// # Arguments
///
/// * `entries: Vec<(&str, Ubj)>` - Pairs of field name and value.
///
/// # Example
///
/// ```
/// use ubj::{prelude::*, rep::*};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     label: String,
/// }
///
/// impl UbjRep for Point {
///     fn to_ubj(&self) -> Ubj {
///         struct_to_ubj_helper(vec![
///             ("x", self.x.to_ubj()),
///             ("label", self.label.to_ubj()),
///         ])
///     }
///
///     fn from_ubj(ks: Ubj) -> Option<Point> {
///         let iter = &mut struct_from_ubj_helper(ks, &["x", "label"])?.into_iter();
///
///         Some(Point {
///             x: pop_ubj(iter)?,
///             label: pop_ubj(iter)?,
///         })
///     }
/// }
///
/// let p = Point {
///     x: -4,
///     label: "here".to_string(),
/// };
/// let enc = encode_full(&p.to_ubj()).unwrap();
///
/// // either shape works
/// assert_eq!(decode_as::<Point>(&enc, Shape::Object).unwrap(), p);
/// assert_eq!(decode_as::<Point>(&enc, Shape::Array).unwrap(), p);
/// ```
pub fn struct_to_ubj_helper(entries: Vec<(&str, Ubj)>) -> Ubj {
    Map(entries
        .into_iter()
        .map(|(k, v)| (Bytes::copy_from_slice(k.as_bytes()), v))
        .collect())
}

/// Manually specify how the fields of a struct should be read from `Ubj`. See
/// [`struct_to_ubj_helper`] for an example of usage.
///
/// Returns the field values in the order of `names`. An object must have exactly those
/// keys. An array, which is what objects decode to under
/// [`Shape::Array`](crate::config::Shape::Array), must have exactly one value per name and
/// is assumed to be in field order.
///
/// # Arguments
///
/// * `ks: Ubj` - The value containing the struct data.
/// * `names: &[&str]` - The names of the fields in the order they are to be extracted.
pub fn struct_from_ubj_helper(ks: Ubj, names: &[&str]) -> Option<Vec<Ubj>> {
    match ks {
        Map(mut m) => {
            if m.len() != names.len() {
                return None;
            }
            names.iter().map(|n| m.remove(n.as_bytes())).collect()
        }
        Array(a) if a.len() == names.len() => Some(a),
        _ => None,
    }
}

/// Gets the next element from an iterator of `Ubj` values as `T`.
///
/// # Example
///
/// ```
/// use ubj::rep::*;
///
/// let values = vec![1, 2, 3].into_ubj().into_vec().unwrap();
///
/// let first: u8 = pop_ubj(&mut values.into_iter()).unwrap();
/// assert_eq!(first, 1);
/// ```
pub fn pop_ubj<T: UbjRep>(iter: &mut IntoIter<Ubj>) -> Option<T> { T::from_ubj(iter.next()?) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_from_any_width() {
        assert_eq!(u8::from_ubj(Int32(200)), Some(200));
        assert_eq!(i8::from_ubj(UInt8(200)), None);
        assert_eq!(i16::from_ubj(Int8(-3)), Some(-3));
        assert_eq!(u16::from_ubj(Int32(65_535)), Some(65_535));
        assert_eq!(u16::from_ubj(Int16(-1)), None);
        assert_eq!(i32::from_ubj(Float32(1.0)), None);
    }

    #[test]
    fn strings_and_chars() {
        assert_eq!(String::from_ubj(Char(b'z')), Some("z".to_string()));
        assert_eq!(
            Bytes::from_ubj(Ubj::from("abc")),
            Some(Bytes::from_static(b"abc"))
        );
        assert_eq!(String::from_ubj(Str(Bytes::from_static(&[0xff]))), None);
        assert_eq!("s".to_string().to_ubj(), Ubj::from("s"));
    }

    #[test]
    fn unit_and_option() {
        assert_eq!(().into_ubj(), Null);
        assert_eq!(<()>::from_ubj(Null), Some(()));

        assert_eq!(None::<u8>.into_ubj(), Null);
        assert_eq!(Some(3u8).into_ubj(), Ubj::from(vec![3]));
        assert_eq!(Option::<u8>::from_ubj(Null), Some(None));
        assert_eq!(Option::<u8>::from_ubj(Ubj::from(vec![3])), Some(Some(3)));
        assert_eq!(Option::<u8>::from_ubj(Ubj::from(vec![3, 4])), None);

        // `Some(())` stays distinct from `None`
        assert_eq!(Option::<()>::from_ubj(Some(()).into_ubj()), Some(Some(())));
    }

    #[test]
    fn vecs_fail_on_any_bad_element() {
        assert_eq!(Vec::<u8>::from_ubj(Ubj::from(vec![1, 2])), Some(vec![1, 2]));
        assert_eq!(Vec::<u8>::from_ubj(Ubj::from(vec![1, 300])), None);
        assert_eq!(Vec::<u8>::from_ubj(Null), None);
    }

    #[test]
    fn string_keyed_maps() {
        let mut m: HashMap<String, bool> = HashMap::new();
        m.insert("a".to_string(), true);
        m.insert("b".to_string(), false);

        let ks = m.to_ubj();
        assert_eq!(ks.to_map().map(VecMap::len), Some(2));
        assert_eq!(HashMap::from_ubj(ks), Some(m));

        let vm: VecMap<Bytes, u8> = vec![(Bytes::from("k"), 1)].into();
        assert_eq!(VecMap::<Bytes, u8>::from_ubj(vm.to_ubj()), Some(vm));
    }

    #[test]
    fn contiguous_int_keys_become_arrays() {
        let m: BTreeMap<i64, u8> = vec![(0, 10), (1, 11), (2, 12)].into_iter().collect();
        assert_eq!(m.clone().into_ubj(), Ubj::from(vec![10, 11, 12]));
        assert_eq!(BTreeMap::from_ubj(m.to_ubj()), Some(m));

        assert_eq!(BTreeMap::<i64, u8>::new().into_ubj(), Array(vec![]));
    }

    #[test]
    fn sparse_int_keys_become_maps() {
        let m: BTreeMap<i64, u8> = vec![(1, 10), (5, 11), (-2, 12)].into_iter().collect();
        let ks = m.to_ubj();

        let expected: VecMap<Bytes, Ubj> = vec![
            (Bytes::from("-2"), Ubj::from(12)),
            (Bytes::from("1"), Ubj::from(10)),
            (Bytes::from("5"), Ubj::from(11)),
        ]
        .into();
        assert_eq!(ks, Map(expected));
        assert_eq!(BTreeMap::from_ubj(ks), Some(m));
    }

    #[test]
    fn tuples() {
        let t = (1u8, "two".to_string());
        assert_eq!(<(u8, String)>::from_ubj(t.to_ubj()), Some(t));

        let t = (true, (), -5i16);
        assert_eq!(<(bool, (), i16)>::from_ubj(t.to_ubj()), Some(t));

        assert_eq!(<(u8, u8)>::from_ubj(Ubj::from(vec![1, 2, 3])), None);
        assert_eq!(<(u8, u8)>::from_ubj(Ubj::from(vec![1])), None);
    }

    #[test]
    fn struct_helpers() {
        let ks = struct_to_ubj_helper(vec![("a", Ubj::from(1)), ("b", Null)]);

        assert_eq!(
            struct_from_ubj_helper(ks.clone(), &["b", "a"]),
            Some(vec![Null, Ubj::from(1)])
        );
        assert_eq!(struct_from_ubj_helper(ks.clone(), &["a"]), None);
        assert_eq!(struct_from_ubj_helper(ks, &["a", "c"]), None);

        assert_eq!(
            struct_from_ubj_helper(Ubj::from(vec![1, 2]), &["a", "b"]),
            Some(vec![Ubj::from(1), Ubj::from(2)])
        );
    }
}

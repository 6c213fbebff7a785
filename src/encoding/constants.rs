/// No-op, reserved. 'N'
pub(crate) const NOOP: u8 = b'N';
/// `null` tag. 'Z'
pub(crate) const NULL: u8 = b'Z';
/// `false` tag. 'F'
pub(crate) const FALSE: u8 = b'F';
/// `true` tag. 'T'
pub(crate) const TRUE: u8 = b'T';
/// Signed byte. 'i'
pub(crate) const INT8: u8 = b'i';
/// Unsigned byte. 'U'
pub(crate) const UINT8: u8 = b'U';
/// Little-endian `i16`. 'I'
pub(crate) const INT16: u8 = b'I';
/// Little-endian `i32`. 'l'
pub(crate) const INT32: u8 = b'l';
/// `i64`, reserved. 'L'
pub(crate) const INT64: u8 = b'L';
/// Single-precision float. 'd'
pub(crate) const FLOAT: u8 = b'd';
/// Double-precision float, reserved. 'D'
pub(crate) const DOUBLE: u8 = b'D';
/// Single raw byte. 'C'
pub(crate) const CHAR: u8 = b'C';
/// Length-prefixed string. 'S'
pub(crate) const STRING: u8 = b'S';
/// Length-prefixed string holding a formatted number. 'H'
pub(crate) const HIGH_PRECISION: u8 = b'H';

pub(crate) const ARRAY_OPEN: u8 = b'[';
pub(crate) const ARRAY_CLOSE: u8 = b']';
pub(crate) const OBJECT_OPEN: u8 = b'{';
pub(crate) const OBJECT_CLOSE: u8 = b'}';

/// Largest integer with a tag, exclusive.
pub(crate) const INT_MAX_EXCL: i64 = 1 << 31;
/// Smallest integer with a tag.
pub(crate) const INT_MIN: i64 = -(1 << 31);

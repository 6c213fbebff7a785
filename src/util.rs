/// Indicates whether `bs` looks like a formatted number: one or more ASCII digits,
/// optionally followed by a `.` and one or more digits.
///
/// Strings like this are tagged as high-precision strings on the wire.
///
/// # Example
///
/// ```
/// use ubj::util::is_numeric_str;
///
/// assert!(is_numeric_str(b"123"));
/// assert!(is_numeric_str(b"3.14"));
///
/// assert!(!is_numeric_str(b""));
/// assert!(!is_numeric_str(b"-1"));
/// assert!(!is_numeric_str(b"1."));
/// assert!(!is_numeric_str(b"1.2.3"));
/// ```
pub fn is_numeric_str(bs: &[u8]) -> bool {
    let int_len = bs.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_len == 0 {
        return false;
    }
    match &bs[int_len..] {
        [] => true,
        [b'.', frac @ ..] => !frac.is_empty() && frac.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Renders a byte string for display: quoted text if it is UTF-8, otherwise hex.
pub(crate) fn fmt_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `TryFrom` easier.
macro_rules! try_from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $crate::errors::Error;

            fn try_from(f: $from) -> Result<$to, Self::Error> { $fn(f) }
        }
    };
}

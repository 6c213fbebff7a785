use failure::Fail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
/// An error encountered while encoding or decoding.
pub enum Error {
    /// A reserved tag (`L`, `D` or `N`) was found in the input. These are part of the
    /// format but not supported by this codec.
    #[fail(display = "unsupported tag {:#04x} at offset {}", tag, offset)]
    UnsupportedTag {
        /// The offending tag byte.
        tag: u8,
        /// Offset of the tag byte.
        offset: usize,
    },
    /// A string length was not encoded with one of `i`, `U`, `I` or `l`, or was
    /// negative.
    #[fail(display = "malformed string length (tag {:#04x}) at offset {}", tag, offset)]
    MalformedLength {
        /// The length tag byte.
        tag: u8,
        /// Offset of the length tag byte.
        offset: usize,
    },
    /// A payload extends past the end of the input.
    #[fail(
        display = "truncated input at offset {}: needed {} bytes, {} remaining",
        offset, needed, remaining
    )]
    TruncatedInput {
        /// Offset the read started at.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// An integer does not fit into any of the integer tags.
    #[fail(display = "integer {} cannot be represented as int32", value)]
    UnrepresentableNumber {
        /// The offending value.
        value: i128,
    },
    /// Containers were nested deeper than the configured limit.
    #[fail(display = "nesting depth exceeds the limit of {}", limit)]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// A container token was found where an object key was expected.
    #[fail(display = "expected an object key at offset {}", offset)]
    InvalidKey {
        /// Offset just past the offending token.
        offset: usize,
    },
    /// A decoded value could not be converted to the requested type.
    #[fail(display = "decoded value is not a valid `{}`", expected)]
    Conversion {
        /// Name of the requested type.
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn unrepresentable<N: Into<i128>>(value: N) -> Self {
        Error::UnrepresentableNumber {
            value: value.into(),
        }
    }
}

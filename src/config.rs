//! Codec configuration.
//!
//! # Example
//!
//! ```
//! use ubj::prelude::*;
//!
//! let config = Config::new().shape(Shape::Object).max_depth(32);
//!
//! let enc = encode_with(&Ubj::from(vec![1, 2, 3]), &config).unwrap();
//! let dec = decode_with(enc.into(), &config).unwrap();
//!
//! assert_eq!(dec, Ubj::from(vec![1, 2, 3]));
//! ```

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
/// What an object-tagged structure decodes into.
pub enum Shape {
    /// Objects decode into an [`Ubj::Array`](crate::Ubj::Array) of their values, in
    /// insertion order. Keys are dropped.
    Array,
    /// Objects decode into an [`Ubj::Map`](crate::Ubj::Map).
    Object,
}

impl Default for Shape {
    fn default() -> Self { Shape::Array }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// Settings shared by the encoder and the decoder.
pub struct Config {
    /// Decode target for objects. Ignored when encoding.
    pub shape: Shape,
    /// Maximum number of nested containers.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shape: Shape::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Sets the decode target shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl From<Shape> for Config {
    fn from(shape: Shape) -> Self { Config::new().shape(shape) }
}

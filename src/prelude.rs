pub use crate::{
    config::{Config, Shape},
    encoding::{decode, decode_as, decode_full, decode_with, encode, encode_full, encode_with},
    errors::Error,
    rep::*,
    vecmap::VecMap,
    Ubj,
};
pub use bytes::Bytes;
pub use std::convert::TryFrom;

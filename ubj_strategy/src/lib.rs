use bytes::Bytes;
use proptest::prelude::*;
use ubj::{vecmap::VecMap, Ubj};

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

/// arbitrary non-NaN f32 for use with proptest
pub fn arb_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("NaN never compares equal", |f| !f.is_nan())
}

/// arbitrary scalar `Ubj` for use with proptest
pub fn arb_leaf() -> impl Strategy<Value = Ubj> {
    prop_oneof![
        Just(Ubj::Null),
        any::<bool>().prop_map(Ubj::Bool),
        // integers
        any::<i8>().prop_map(Ubj::from),
        any::<u8>().prop_map(Ubj::from),
        any::<i16>().prop_map(Ubj::from),
        any::<u16>().prop_map(Ubj::from),
        any::<i32>().prop_map(Ubj::from),
        // floats
        arb_f32().prop_map(Ubj::from),
        // strings
        any::<u8>().prop_map(Ubj::Char),
        any::<String>().prop_map(Ubj::from),
        "[0-9]{1,12}(\\.[0-9]{1,6})?".prop_map(Ubj::from),
        arb_bs().prop_map(Ubj::from),
    ]
}

/// arbitrary `Ubj` for use with proptest, nested at most five levels deep
pub fn arb_ubj() -> impl Strategy<Value = Ubj> {
    arb_leaf().prop_recursive(
        5,  // max depth
        64, // max nodes
        8,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Ubj::from),
                // btree keys are unique
                prop::collection::btree_map(arb_bs(), inner, 0..8)
                    .prop_map(|m| Ubj::Map(VecMap::from(m)))
            ]
        },
    )
}

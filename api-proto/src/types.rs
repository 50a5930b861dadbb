//! Type name translation from source type spellings to proto3 scalars
//!
//! The tables are built once and shared read-only. Lookup is plain string
//! equality; no type grammar is parsed here.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ir::Scalar;

/// Pointer/slice prefixes under which a scalar is still a scalar
const PREFIXES: [&str; 5] = ["*", "[]", "*[]", "[]*", "*[]*"];

/// Pointer marker
pub const POINTER: &str = "*";

/// Slice marker
pub const SLICE: &str = "[]";

const BASIC: &[(&str, Scalar)] = &[
    ("float64", Scalar::Double),
    ("float32", Scalar::Float),
    ("int", Scalar::Int32),
    ("int8", Scalar::Int32),
    ("int16", Scalar::Int32),
    ("int32", Scalar::Int32),
    ("int64", Scalar::Int64),
    ("uint", Scalar::Uint32),
    ("uint8", Scalar::Uint32),
    ("uint16", Scalar::Uint32),
    ("uint32", Scalar::Uint32),
    ("uint64", Scalar::Uint64),
    ("bool", Scalar::Bool),
    ("string", Scalar::String),
    ("byte", Scalar::Uint32),
    ("*byte", Scalar::Uint32),
    ("[]byte", Scalar::Bytes),
    ("*[]byte", Scalar::Bytes),
    ("[]*byte", Scalar::Bytes),
    ("*[]*byte", Scalar::Bytes),
    // Placeholder for untyped values
    ("any", Scalar::Bytes),
    ("interface{}", Scalar::Bytes),
];

const MAP_KEYS: &[(&str, Scalar)] = &[
    ("int", Scalar::Int32),
    ("int8", Scalar::Int32),
    ("int16", Scalar::Int32),
    ("int32", Scalar::Int32),
    ("int64", Scalar::Int64),
    ("uint", Scalar::Uint32),
    ("uint8", Scalar::Uint32),
    ("uint16", Scalar::Uint32),
    ("uint32", Scalar::Uint32),
    ("uint64", Scalar::Uint64),
    ("string", Scalar::String),
];

/// Field spellings that resolve to a scalar
static FIELD_TYPES: Lazy<HashMap<String, Scalar>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for &(name, scalar) in BASIC {
        table.insert(name.to_string(), scalar);
        // Byte spellings already mean opaque bytes
        if name.contains("byte") {
            continue;
        }
        for prefix in PREFIXES {
            table.insert(format!("{}{}", prefix, name), scalar);
        }
    }
    table
});

/// Map key spellings, optionally behind one pointer
static MAP_KEY_TYPES: Lazy<HashMap<String, Scalar>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for &(name, scalar) in MAP_KEYS {
        table.insert(name.to_string(), scalar);
        table.insert(format!("{}{}", POINTER, name), scalar);
    }
    table
});

/// Resolve a field type spelling to a scalar, if it is one
pub fn scalar_type(spelling: &str) -> Option<Scalar> {
    FIELD_TYPES.get(spelling).copied()
}

/// Resolve a map key spelling to a scalar, if it is a valid key
pub fn map_key_type(spelling: &str) -> Option<Scalar> {
    MAP_KEY_TYPES.get(spelling).copied()
}

/// Strip every pointer and slice marker from a spelling
pub fn strip_markers(spelling: &str) -> String {
    spelling.replace(POINTER, "").replace(SLICE, "")
}

//! Map type parsing
//!
//! Turns a spelling such as `map[string]*User` into a `map<string,User>`
//! field type, rejecting keys and values proto3 maps cannot express.

use crate::error::MapTypeError;
use crate::ir::{FieldType, MapValue};
use crate::types;

const MAP_OPEN: &str = "map[";

/// Parse a map type spelling
pub fn parse_map_type(spelling: &str) -> Result<FieldType, MapTypeError> {
    let (before, after) = spelling
        .split_once(MAP_OPEN)
        .ok_or_else(|| MapTypeError::NotMap(spelling.to_string()))?;

    if !before.is_empty() {
        return Err(MapTypeError::LeadingMarker(spelling.to_string()));
    }

    let (key, value) = after
        .split_once(']')
        .ok_or_else(|| MapTypeError::UnterminatedKey(spelling.to_string()))?;

    let key = types::map_key_type(key).ok_or_else(|| MapTypeError::UnsupportedKey {
        spelling: spelling.to_string(),
        key: key.to_string(),
    })?;

    if value.contains('[') {
        return Err(MapTypeError::NestedValue(spelling.to_string()));
    }

    let value = match types::scalar_type(value) {
        Some(scalar) => MapValue::Scalar(scalar),
        None => MapValue::Message(value.replace(types::POINTER, "")),
    };

    Ok(FieldType::Map { key, value })
}

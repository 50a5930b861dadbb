//! Error types for schema translation
//!
//! Every failure is returned as a value. A translation that fails produces
//! no partial output.

/// Error raised while parsing a map type spelling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapTypeError {
    /// The spelling does not mention a map at all
    #[error("field type {0} is not a map")]
    NotMap(String),

    /// Something precedes `map[`, e.g. a pointer-to-map
    #[error("unsupported field type {0}: map must not be behind a pointer or slice")]
    LeadingMarker(String),

    /// No `]` closes the key segment
    #[error("unsupported field type {0}: unterminated map key")]
    UnterminatedKey(String),

    /// The key is not an integer or string type
    #[error("unsupported field type {spelling}: invalid map key type {key}")]
    UnsupportedKey {
        /// The full map spelling
        spelling: String,
        /// The rejected key segment
        key: String,
    },

    /// The value is itself a map or a slice
    #[error("unsupported field type {0}: nested map or slice values are not allowed")]
    NestedValue(String),
}

/// Error type for schema translation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// An input of the wrong shape reached an entry point
    #[error("unsupported input {found}, only {expected} is supported")]
    UnsupportedShape {
        /// Shape the entry point accepts
        expected: &'static str,
        /// Shape that was supplied
        found: &'static str,
    },

    /// A map field had a malformed type spelling
    #[error("parse map field {field} failed: {source}")]
    MapField {
        /// Name of the offending field
        field: String,
        /// Underlying parse failure
        #[source]
        source: MapTypeError,
    },

    /// A route references a struct that is not defined
    #[error("rpc {rpc} references undefined type {name}")]
    UndefinedType {
        /// Handler name of the route
        rpc: String,
        /// The missing struct name
        name: String,
    },
}

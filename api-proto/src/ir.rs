//! Intermediate Representation (IR) of the generated proto3 schema
//!
//! The IR is what the translator produces and what the renderer and the
//! descriptor exporter consume. Messages are shared through `Arc` so that
//! several RPCs can point at the same request or response message.

use std::fmt;
use std::sync::Arc;

/// Name of the placeholder message used for absent request/response bodies
pub const EMPTY_MESSAGE_NAME: &str = "Empty";

/// Schema syntax version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    #[default]
    Proto3,
}

impl Syntax {
    /// The keyword written in `syntax = "...";`
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Proto3 => "proto3",
        }
    }
}

/// A file-level option such as `go_package`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOption {
    /// Option name
    pub name: String,

    /// Option value (unquoted)
    pub value: String,
}

/// A complete translated proto file
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    /// Syntax version, always proto3
    pub syntax: Syntax,

    /// Package name (lowercased service name)
    pub package: String,

    /// File options
    pub options: Vec<FileOption>,

    /// Messages in output order
    pub messages: Vec<Arc<Message>>,

    /// The single service of the file
    pub service: Service,
}

/// A proto message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Message name
    pub name: String,

    /// Description lines
    pub descs: Vec<String>,

    /// Fields in declaration order
    pub fields: Vec<MessageField>,
}

impl Message {
    /// The zero-field placeholder message
    pub fn empty() -> Self {
        Message {
            name: EMPTY_MESSAGE_NAME.to_string(),
            ..Default::default()
        }
    }
}

/// A field of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    /// Field name, copied verbatim from the source member
    pub name: String,

    /// Description lines
    pub descs: Vec<String>,

    /// Resolved target type
    pub field_type: FieldType,

    /// Whether the source spelling was a slice
    pub repeated: bool,
}

impl MessageField {
    /// Canonical type name, e.g. `int64`, `map<string,int64>` or `User`
    pub fn type_name(&self) -> String {
        self.field_type.to_string()
    }
}

/// Proto3 scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    String,
    Bytes,
}

impl Scalar {
    /// The proto3 keyword for this scalar
    pub fn as_str(&self) -> &'static str {
        match self {
            Scalar::Double => "double",
            Scalar::Float => "float",
            Scalar::Int32 => "int32",
            Scalar::Int64 => "int64",
            Scalar::Uint32 => "uint32",
            Scalar::Uint64 => "uint64",
            Scalar::Bool => "bool",
            Scalar::String => "string",
            Scalar::Bytes => "bytes",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value side of a map field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapValue {
    Scalar(Scalar),
    Message(String),
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapValue::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            MapValue::Message(name) => f.write_str(name),
        }
    }
}

/// Resolved type of a message field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A scalar leaf type
    Scalar(Scalar),

    /// `map<K,V>`
    Map { key: Scalar, value: MapValue },

    /// Reference to another message by name
    Message(String),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            FieldType::Map { key, value } => write!(f, "map<{},{}>", key, value),
            FieldType::Message(name) => f.write_str(name),
        }
    }
}

/// The service of a proto file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Service {
    /// Service name, as declared in the source
    pub name: String,

    /// RPCs in route order
    pub rpcs: Vec<ServiceRpc>,
}

/// A single RPC method
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRpc {
    /// RPC name (the route's handler name)
    pub name: String,

    /// Description lines
    pub descs: Vec<String>,

    /// Request message, shared with the file's message list
    pub request: Arc<Message>,

    /// Response message, shared with the file's message list
    pub response: Arc<Message>,
}

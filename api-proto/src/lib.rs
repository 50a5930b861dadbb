//! api-proto
//!
//! Translates an HTTP service description (struct definitions plus route
//! groups) into a proto3 schema model: one message per struct, one RPC per
//! route, and a shared `Empty` message for routes without a body.
//!
//! ```
//! use api_proto::api::{ApiSpec, DefineStruct, Member};
//! use api_proto::File;
//!
//! let mut api = ApiSpec::default();
//! api.service.name = "Greeter".to_string();
//! api.types.push(DefineStruct {
//!     name: "Hello".to_string(),
//!     docs: Vec::new(),
//!     members: vec![Member {
//!         name: "Names".to_string(),
//!         type_name: "[]string".to_string(),
//!         ..Default::default()
//!     }],
//! });
//!
//! let file = File::from_api(&api)?;
//! assert_eq!(file.package, "greeter");
//! assert!(file.messages[0].fields[0].repeated);
//! # Ok::<(), api_proto::TranslateError>(())
//! ```

pub mod api;
mod descriptor;
mod error;
mod field;
mod file;
pub mod ir;
pub mod map;
pub mod options;
mod render;
pub mod types;

pub use error::{MapTypeError, TranslateError};
pub use file::GO_PACKAGE_OPTION;
pub use ir::{File, Message, MessageField, Service, ServiceRpc};
pub use options::Options;

//! Translation options

/// Default value of the `go_package` file option
pub const DEFAULT_GO_PACKAGE: &str = "/protoc-gen-go";

/// Options controlling file-level metadata of the generated schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Value of the `go_package` option
    pub go_package: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            go_package: DEFAULT_GO_PACKAGE.to_string(),
        }
    }
}

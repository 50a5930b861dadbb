//! File translation
//!
//! Orchestrates a single pass over a service description: every struct
//! becomes a message, every route becomes an RPC, and routes without a
//! request or response body share one `Empty` message.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ApiSpec, DefineStruct, Source};
use crate::error::TranslateError;
use crate::ir::{File, FileOption, Message, MessageField, Service, ServiceRpc, Syntax};
use crate::options::Options;

/// Name of the file option carrying the build output package
pub const GO_PACKAGE_OPTION: &str = "go_package";

/// Per-invocation translation state
struct Translator {
    /// Messages in output order
    messages: Vec<Arc<Message>>,

    /// Name lookup; later duplicates win
    by_name: HashMap<String, Arc<Message>>,

    /// Placeholder for absent bodies, local to this invocation
    empty: Arc<Message>,

    /// Whether `empty` has been added to `messages`
    empty_inserted: bool,
}

impl Translator {
    fn new(capacity: usize) -> Self {
        Translator {
            messages: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
            empty: Arc::new(Message::empty()),
            empty_inserted: false,
        }
    }

    fn add_struct(&mut self, def: &DefineStruct) -> Result<(), TranslateError> {
        let fields = def
            .members
            .iter()
            .map(MessageField::from_member)
            .collect::<Result<Vec<_>, _>>()?;

        let message = Arc::new(Message {
            name: def.name.clone(),
            descs: def.docs.clone(),
            fields,
        });
        tracing::debug!(name = %message.name, fields = message.fields.len(), "translated message");

        if self
            .by_name
            .insert(message.name.clone(), Arc::clone(&message))
            .is_some()
        {
            tracing::warn!(name = %message.name, "duplicate struct name, later definition wins lookups");
        }
        self.messages.push(message);
        Ok(())
    }

    /// Resolve a route body to a message, substituting `Empty` when absent
    fn resolve(&mut self, rpc: &str, body: Option<&str>) -> Result<Arc<Message>, TranslateError> {
        match body {
            Some(name) => self.by_name.get(name).cloned().ok_or_else(|| {
                TranslateError::UndefinedType {
                    rpc: rpc.to_string(),
                    name: name.to_string(),
                }
            }),
            None => Ok(self.empty()),
        }
    }

    fn empty(&mut self) -> Arc<Message> {
        if !self.empty_inserted {
            self.empty_inserted = true;
            match self.by_name.get(&self.empty.name) {
                // A struct already claims the name; reuse it rather than
                // emitting a second `Empty`
                Some(existing) => self.empty = Arc::clone(existing),
                None => {
                    self.by_name
                        .insert(self.empty.name.clone(), Arc::clone(&self.empty));
                    self.messages.insert(0, Arc::clone(&self.empty));
                    tracing::debug!("inserted Empty message");
                }
            }
        }
        Arc::clone(&self.empty)
    }
}

impl File {
    /// Translate a service description with default options
    pub fn from_api(api: &ApiSpec) -> Result<Self, TranslateError> {
        File::from_api_with(api, &Options::default())
    }

    /// Translate a service description
    ///
    /// Fails on the first field that cannot be translated; no partial file
    /// is returned.
    pub fn from_api_with(api: &ApiSpec, options: &Options) -> Result<Self, TranslateError> {
        let mut translator = Translator::new(api.types.len());

        for def in &api.types {
            translator.add_struct(def)?;
        }

        let mut rpcs = Vec::new();
        for group in api.service.join_prefix().groups {
            for route in group.routes {
                let request = translator.resolve(&route.handler, route.request_type.as_deref())?;
                let response =
                    translator.resolve(&route.handler, route.response_type.as_deref())?;
                tracing::debug!(rpc = %route.handler, path = %route.path, "translated rpc");

                rpcs.push(ServiceRpc {
                    descs: vec![route.joined_doc().trim_matches('"').to_string()],
                    name: route.handler,
                    request,
                    response,
                });
            }
        }

        Ok(File {
            syntax: Syntax::Proto3,
            package: api.service.name.to_lowercase(),
            options: vec![FileOption {
                name: GO_PACKAGE_OPTION.to_string(),
                value: options.go_package.clone(),
            }],
            messages: translator.messages,
            service: Service {
                name: api.service.name.clone(),
                rpcs,
            },
        })
    }

    /// Translate an untyped input, rejecting anything but a service description
    pub fn from_source_with(source: &Source, options: &Options) -> Result<Self, TranslateError> {
        match source {
            Source::Api(api) => File::from_api_with(api, options),
            other => Err(TranslateError::UnsupportedShape {
                expected: "api spec",
                found: other.shape(),
            }),
        }
    }
}

impl TryFrom<&Source> for File {
    type Error = TranslateError;

    fn try_from(source: &Source) -> Result<Self, Self::Error> {
        File::from_source_with(source, &Options::default())
    }
}

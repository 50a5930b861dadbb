//! Service description input model
//!
//! These types describe an HTTP service the way the api description
//! language does: struct definitions with typed members, and a service made
//! of route groups. They are fully materialized before translation and can
//! be loaded from JSON.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Group annotation holding the path prefix shared by its routes
pub const ROUTE_PREFIX_KEY: &str = "prefix";

/// Root of a service description
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiSpec {
    /// The described service
    pub service: Service,

    /// Struct type definitions in source order
    #[serde(default)]
    pub types: Vec<DefineStruct>,
}

/// A struct type definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DefineStruct {
    /// Struct name
    pub name: String,

    /// Documentation lines
    #[serde(default)]
    pub docs: Vec<String>,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<Member>,
}

/// A single struct member (field descriptor)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Member {
    /// Member name
    pub name: String,

    /// Type spelling, e.g. `int64`, `[]*User` or `map[string]int32`
    #[serde(rename = "type")]
    pub type_name: String,

    /// Raw struct tag (carried, not translated)
    #[serde(default)]
    pub tag: String,

    /// Inline trailing comment, including its `//` marker
    #[serde(default)]
    pub comment: String,

    /// Documentation lines above the member
    #[serde(default)]
    pub docs: Vec<String>,
}

/// A service with its route groups
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Service {
    /// Service name
    pub name: String,

    /// Route groups
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Service {
    /// Return a copy whose route paths carry their group's prefix
    pub fn join_prefix(&self) -> Service {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                let prefix = group
                    .annotation
                    .get(ROUTE_PREFIX_KEY)
                    .map(|p| p.trim().replace('"', ""))
                    .unwrap_or_default();
                let routes = group
                    .routes
                    .iter()
                    .map(|route| Route {
                        path: join_path(&["/", &prefix, &route.path]),
                        ..route.clone()
                    })
                    .collect();
                Group {
                    annotation: group.annotation.clone(),
                    routes,
                }
            })
            .collect();

        Service {
            name: self.name.clone(),
            groups,
        }
    }
}

/// A group of routes sharing annotations
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Group {
    /// Group annotations (e.g. `prefix`, `group`, `jwt`)
    #[serde(default)]
    pub annotation: BTreeMap<String, String>,

    /// Routes in declaration order
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route binding a handler to request/response types
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Route {
    /// HTTP method
    #[serde(default)]
    pub method: String,

    /// Route path
    #[serde(default)]
    pub path: String,

    /// Handler name
    pub handler: String,

    /// Name of the request struct, if the route has a body
    #[serde(default)]
    pub request_type: Option<String>,

    /// Name of the response struct, if the route returns one
    #[serde(default)]
    pub response_type: Option<String>,

    /// `@doc` annotation
    #[serde(default)]
    pub at_doc: AtDoc,

    /// Plain documentation lines
    #[serde(default)]
    pub docs: Vec<String>,
}

impl Route {
    /// Documentation combined from `@doc` text, its summary and the doc lines
    pub fn joined_doc(&self) -> String {
        let mut doc = self.at_doc.text.clone();
        if let Some(summary) = self.at_doc.properties.get("summary") {
            doc.push_str(summary);
        }
        doc.push_str(&self.docs.join(" "));
        doc.trim().to_string()
    }
}

/// An `@doc` annotation
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AtDoc {
    /// Free text form, `@doc "..."`
    #[serde(default)]
    pub text: String,

    /// Key/value form, `@doc(summary: "...")`
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Input shapes accepted at untyped boundaries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// A whole service description
    Api(ApiSpec),

    /// A single field descriptor
    Member(Member),
}

impl Source {
    /// Short name of the shape, used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Source::Api(_) => "api spec",
            Source::Member(_) => "member",
        }
    }
}

/// Join path segments and clean the result into an absolute path
fn join_path(parts: &[&str]) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for part in parts {
        for segment in part.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
    }
    format!("/{}", segments.join("/"))
}

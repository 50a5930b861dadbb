//! Export of the translated schema as protobuf descriptors
//!
//! Builds a `FileDescriptorProto` equivalent to what protoc would produce
//! for the rendered proto3 text, so the result can be fed to prost-build or
//! any descriptor-based tooling without a protoc round trip.

use heck::ToUpperCamelCase;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet, FileOptions,
    MessageOptions, MethodDescriptorProto, ServiceDescriptorProto,
};

use crate::file::GO_PACKAGE_OPTION;
use crate::ir::{FieldType, File, MapValue, Message, MessageField, Scalar};

impl Scalar {
    /// Descriptor type of this scalar
    pub fn descriptor_type(&self) -> Type {
        match self {
            Scalar::Double => Type::Double,
            Scalar::Float => Type::Float,
            Scalar::Int32 => Type::Int32,
            Scalar::Int64 => Type::Int64,
            Scalar::Uint32 => Type::Uint32,
            Scalar::Uint64 => Type::Uint64,
            Scalar::Bool => Type::Bool,
            Scalar::String => Type::String,
            Scalar::Bytes => Type::Bytes,
        }
    }
}

impl File {
    /// Build the descriptor for this file
    pub fn to_file_descriptor(&self) -> FileDescriptorProto {
        let options = self
            .options
            .iter()
            .find(|o| o.name == GO_PACKAGE_OPTION)
            .map(|o| FileOptions {
                go_package: Some(o.value.clone()),
                ..Default::default()
            });

        FileDescriptorProto {
            name: Some(format!("{}.proto", self.package)),
            package: Some(self.package.clone()),
            message_type: self
                .messages
                .iter()
                .map(|m| message_descriptor(&self.package, m))
                .collect(),
            service: vec![ServiceDescriptorProto {
                name: Some(self.service.name.clone()),
                method: self
                    .service
                    .rpcs
                    .iter()
                    .map(|rpc| MethodDescriptorProto {
                        name: Some(rpc.name.clone()),
                        input_type: Some(qualify(&self.package, &[rpc.request.name.as_str()])),
                        output_type: Some(qualify(&self.package, &[rpc.response.name.as_str()])),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }],
            options,
            syntax: Some(self.syntax.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Build a descriptor set containing only this file
    pub fn to_file_descriptor_set(&self) -> FileDescriptorSet {
        FileDescriptorSet {
            file: vec![self.to_file_descriptor()],
        }
    }
}

fn message_descriptor(package: &str, message: &Message) -> DescriptorProto {
    let mut descriptor = DescriptorProto {
        name: Some(message.name.clone()),
        ..Default::default()
    };

    for (index, field) in message.fields.iter().enumerate() {
        let number = index as i32 + 1;
        let field_descriptor = match &field.field_type {
            FieldType::Map { key, value } => {
                let entry_name = format!("{}Entry", field.name.to_upper_camel_case());
                descriptor
                    .nested_type
                    .push(map_entry(package, &entry_name, *key, value));
                FieldDescriptorProto {
                    r#type: Some(Type::Message as i32),
                    type_name: Some(qualify(package, &[message.name.as_str(), entry_name.as_str()])),
                    label: Some(Label::Repeated as i32),
                    ..base_field(field, number)
                }
            }
            FieldType::Scalar(scalar) => FieldDescriptorProto {
                r#type: Some(scalar.descriptor_type() as i32),
                ..base_field(field, number)
            },
            FieldType::Message(name) => FieldDescriptorProto {
                r#type: Some(Type::Message as i32),
                type_name: Some(qualify(package, &[name.as_str()])),
                ..base_field(field, number)
            },
        };
        descriptor.field.push(field_descriptor);
    }

    descriptor
}

fn base_field(field: &MessageField, number: i32) -> FieldDescriptorProto {
    let label = if field.repeated {
        Label::Repeated
    } else {
        Label::Optional
    };
    FieldDescriptorProto {
        name: Some(field.name.clone()),
        number: Some(number),
        label: Some(label as i32),
        ..Default::default()
    }
}

/// Synthesized `XxxEntry` message backing a map field
fn map_entry(package: &str, name: &str, key: Scalar, value: &MapValue) -> DescriptorProto {
    let key_field = FieldDescriptorProto {
        name: Some("key".to_string()),
        number: Some(1),
        label: Some(Label::Optional as i32),
        r#type: Some(key.descriptor_type() as i32),
        ..Default::default()
    };
    let value_field = match value {
        MapValue::Scalar(scalar) => FieldDescriptorProto {
            r#type: Some(scalar.descriptor_type() as i32),
            ..Default::default()
        },
        MapValue::Message(message) => FieldDescriptorProto {
            r#type: Some(Type::Message as i32),
            type_name: Some(qualify(package, &[message.as_str()])),
            ..Default::default()
        },
    };

    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![
            key_field,
            FieldDescriptorProto {
                name: Some("value".to_string()),
                number: Some(2),
                label: Some(Label::Optional as i32),
                ..value_field
            },
        ],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Fully-qualified type name, e.g. `.userservice.User.MetaEntry`
fn qualify(package: &str, path: &[&str]) -> String {
    let mut name = String::new();
    if !package.is_empty() {
        name.push('.');
        name.push_str(package);
    }
    for segment in path {
        name.push('.');
        name.push_str(segment);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiSpec, DefineStruct, Group, Member, Route};
    use prost::Message as _;
    use prost_reflect::DescriptorPool;

    fn member(name: &str, type_name: &str) -> Member {
        Member {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }

    fn user_api() -> ApiSpec {
        let mut api = ApiSpec::default();
        api.service.name = "UserService".to_string();
        api.types = vec![
            DefineStruct {
                name: "User".to_string(),
                docs: Vec::new(),
                members: vec![
                    member("Id", "int64"),
                    member("Tags", "[]string"),
                    member("Meta", "map[string]string"),
                    member("Friends", "map[int64]*User"),
                    member("Avatar", "[]byte"),
                ],
            },
            DefineStruct {
                name: "ListUsersResp".to_string(),
                docs: Vec::new(),
                members: vec![member("Users", "[]*User")],
            },
        ];
        api.service.groups.push(Group {
            routes: vec![Route {
                handler: "ListUsers".to_string(),
                response_type: Some("ListUsersResp".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });
        api
    }

    fn user_descriptor() -> FileDescriptorProto {
        File::from_api(&user_api()).unwrap().to_file_descriptor()
    }

    #[test]
    fn test_file_header() {
        let fd = user_descriptor();
        assert_eq!(fd.name(), "userservice.proto");
        assert_eq!(fd.package(), "userservice");
        assert_eq!(fd.syntax(), "proto3");
        assert_eq!(fd.options.unwrap().go_package(), "/protoc-gen-go");
    }

    #[test]
    fn test_message_fields() {
        let fd = user_descriptor();
        let names: Vec<&str> = fd.message_type.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Empty", "User", "ListUsersResp"]);

        let user = &fd.message_type[1];
        let id = &user.field[0];
        assert_eq!(id.number(), 1);
        assert_eq!(id.r#type(), Type::Int64);
        assert_eq!(id.label(), Label::Optional);

        let tags = &user.field[1];
        assert_eq!(tags.number(), 2);
        assert_eq!(tags.r#type(), Type::String);
        assert_eq!(tags.label(), Label::Repeated);

        let avatar = &user.field[4];
        assert_eq!(avatar.r#type(), Type::Bytes);

        let users = &fd.message_type[2].field[0];
        assert_eq!(users.r#type(), Type::Message);
        assert_eq!(users.type_name(), ".userservice.User");
        assert_eq!(users.label(), Label::Repeated);
    }

    #[test]
    fn test_map_entries() {
        let fd = user_descriptor();
        let user = &fd.message_type[1];

        let meta = &user.field[2];
        assert_eq!(meta.label(), Label::Repeated);
        assert_eq!(meta.type_name(), ".userservice.User.MetaEntry");

        let entries: Vec<&str> = user.nested_type.iter().map(|m| m.name()).collect();
        assert_eq!(entries, vec!["MetaEntry", "FriendsEntry"]);

        let friends = &user.nested_type[1];
        assert!(friends.options.as_ref().unwrap().map_entry());
        assert_eq!(friends.field[0].r#type(), Type::Int64);
        assert_eq!(friends.field[1].type_name(), ".userservice.User");
    }

    #[test]
    fn test_service_methods() {
        let fd = user_descriptor();
        let method = &fd.service[0].method[0];
        assert_eq!(fd.service[0].name(), "UserService");
        assert_eq!(method.name(), "ListUsers");
        assert_eq!(method.input_type(), ".userservice.Empty");
        assert_eq!(method.output_type(), ".userservice.ListUsersResp");
    }

    #[test]
    fn test_descriptor_set_is_valid() {
        let file = File::from_api(&user_api()).unwrap();
        let bytes = file.to_file_descriptor_set().encode_to_vec();
        let pool = DescriptorPool::decode(bytes.as_slice()).unwrap();

        let user = pool.get_message_by_name("userservice.User").unwrap();
        assert!(user.get_field_by_name("Meta").unwrap().is_map());
        assert!(user.get_field_by_name("Tags").unwrap().is_list());
        assert!(pool.get_service_by_name("userservice.UserService").is_some());
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("pkg", &["User"]), ".pkg.User");
        assert_eq!(qualify("", &["User", "MetaEntry"]), ".User.MetaEntry");
    }
}

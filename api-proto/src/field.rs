//! Message field translation
//!
//! Converts one struct member into a proto message field.

use crate::api::{Member, Source};
use crate::error::TranslateError;
use crate::ir::{FieldType, MessageField};
use crate::map::parse_map_type;
use crate::types;

const COMMENT_MARKER: &str = "//";

impl MessageField {
    /// Translate a struct member into a message field
    ///
    /// The type is resolved as a scalar first, then as a map, and otherwise
    /// as a reference to another message. `repeated` only looks at whether
    /// the spelling contains a slice marker.
    pub fn from_member(member: &Member) -> Result<Self, TranslateError> {
        let spelling = member.type_name.as_str();

        let mut descs = member.docs.clone();
        let comment = member.comment.trim_start();
        let comment = comment.strip_prefix(COMMENT_MARKER).unwrap_or(comment).trim();
        if !comment.is_empty() {
            descs.push(comment.to_string());
        }

        let field_type = if let Some(scalar) = types::scalar_type(spelling) {
            FieldType::Scalar(scalar)
        } else if spelling.contains("map[") {
            parse_map_type(spelling).map_err(|source| TranslateError::MapField {
                field: member.name.clone(),
                source,
            })?
        } else {
            FieldType::Message(types::strip_markers(spelling))
        };

        // Struct tags are not translated yet
        Ok(MessageField {
            name: member.name.clone(),
            descs,
            field_type,
            repeated: spelling.contains(types::SLICE),
        })
    }
}

impl TryFrom<&Source> for MessageField {
    type Error = TranslateError;

    fn try_from(source: &Source) -> Result<Self, Self::Error> {
        match source {
            Source::Member(member) => MessageField::from_member(member),
            other => Err(TranslateError::UnsupportedShape {
                expected: "member",
                found: other.shape(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiSpec;
    use crate::error::MapTypeError;
    use crate::ir::{MapValue, Scalar};

    fn member(name: &str, type_name: &str) -> Member {
        Member {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }

    fn translate(type_name: &str) -> MessageField {
        MessageField::from_member(&member("Field", type_name)).unwrap()
    }

    #[test]
    fn test_scalar_field() {
        let field = translate("int64");
        assert_eq!(field.name, "Field");
        assert_eq!(field.field_type, FieldType::Scalar(Scalar::Int64));
        assert_eq!(field.type_name(), "int64");
        assert!(!field.repeated);
    }

    #[test]
    fn test_repeated_scalar() {
        let field = translate("[]string");
        assert_eq!(field.type_name(), "string");
        assert!(field.repeated);

        let field = translate("*[]*int8");
        assert_eq!(field.type_name(), "int32");
        assert!(field.repeated);

        let field = translate("*int8");
        assert!(!field.repeated);
    }

    #[test]
    fn test_bytes_field() {
        let field = translate("[]byte");
        assert_eq!(field.type_name(), "bytes");
        // The slice marker still counts
        assert!(field.repeated);
    }

    #[test]
    fn test_map_field() {
        let field = translate("map[string]string");
        assert_eq!(field.type_name(), "map<string,string>");
        assert!(!field.repeated);

        let field = translate("map[int]*User");
        assert_eq!(
            field.field_type,
            FieldType::Map {
                key: Scalar::Int32,
                value: MapValue::Message("User".to_string()),
            }
        );
    }

    #[test]
    fn test_map_field_error_names_field() {
        let err = MessageField::from_member(&member("Meta", "map[bool]string")).unwrap_err();
        assert_eq!(
            err,
            TranslateError::MapField {
                field: "Meta".to_string(),
                source: MapTypeError::UnsupportedKey {
                    spelling: "map[bool]string".to_string(),
                    key: "bool".to_string(),
                },
            }
        );
        assert!(err.to_string().contains("Meta"));
    }

    #[test]
    fn test_slice_of_maps_is_rejected() {
        let err = MessageField::from_member(&member("Items", "[]map[string]int32")).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::MapField {
                source: MapTypeError::LeadingMarker(_),
                ..
            }
        ));
    }

    #[test]
    fn test_message_reference() {
        let field = translate("User");
        assert_eq!(field.field_type, FieldType::Message("User".to_string()));
        assert!(!field.repeated);

        let field = translate("[]*User");
        assert_eq!(field.type_name(), "User");
        assert!(field.repeated);

        let field = translate("*User");
        assert_eq!(field.type_name(), "User");
        assert!(!field.repeated);
    }

    #[test]
    fn test_descriptions() {
        let mut m = member("Id", "int64");
        m.docs = vec!["user id".to_string()];
        m.comment = "//   primary key  ".to_string();
        let field = MessageField::from_member(&m).unwrap();
        assert_eq!(field.descs, vec!["user id", "primary key"]);

        m.comment = "//   ".to_string();
        let field = MessageField::from_member(&m).unwrap();
        assert_eq!(field.descs, vec!["user id"]);

        m.comment = String::new();
        let field = MessageField::from_member(&m).unwrap();
        assert_eq!(field.descs, vec!["user id"]);
    }

    #[test]
    fn test_tag_is_ignored() {
        let mut m = member("Name", "string");
        m.tag = "`json:\"name,optional\"`".to_string();
        let field = MessageField::from_member(&m).unwrap();
        assert_eq!(field.name, "Name");
        assert_eq!(field.type_name(), "string");
    }

    #[test]
    fn test_from_source() {
        let field = MessageField::try_from(&Source::Member(member("Id", "int64"))).unwrap();
        assert_eq!(field.type_name(), "int64");

        let err = MessageField::try_from(&Source::Api(ApiSpec::default())).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnsupportedShape {
                expected: "member",
                found: "api spec",
            }
        );
    }
}

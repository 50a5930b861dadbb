//! Proto3 text rendering
//!
//! `File` implements `Display`, producing a `.proto` source that protoc
//! accepts for any file whose fields are not repeated maps.

use std::fmt;

use crate::ir::{File, Message, ServiceRpc};

const INDENT: &str = "  ";

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "syntax = \"{}\";", self.syntax.as_str())?;
        writeln!(f)?;
        writeln!(f, "package {};", self.package)?;

        if !self.options.is_empty() {
            writeln!(f)?;
            for option in &self.options {
                writeln!(f, "option {} = \"{}\";", option.name, option.value)?;
            }
        }

        for message in &self.messages {
            writeln!(f)?;
            write_message(f, message)?;
        }

        writeln!(f)?;
        writeln!(f, "service {} {{", self.service.name)?;
        for rpc in &self.service.rpcs {
            write_rpc(f, rpc)?;
        }
        writeln!(f, "}}")
    }
}

fn write_message(f: &mut fmt::Formatter<'_>, message: &Message) -> fmt::Result {
    write_descs(f, "", &message.descs)?;
    if message.fields.is_empty() {
        return writeln!(f, "message {} {{}}", message.name);
    }

    writeln!(f, "message {} {{", message.name)?;
    for (index, field) in message.fields.iter().enumerate() {
        write_descs(f, INDENT, &field.descs)?;
        let label = if field.repeated { "repeated " } else { "" };
        writeln!(
            f,
            "{}{}{} {} = {};",
            INDENT,
            label,
            field.field_type,
            field.name,
            index + 1
        )?;
    }
    writeln!(f, "}}")
}

fn write_rpc(f: &mut fmt::Formatter<'_>, rpc: &ServiceRpc) -> fmt::Result {
    write_descs(f, INDENT, &rpc.descs)?;
    writeln!(
        f,
        "{}rpc {}({}) returns ({});",
        INDENT, rpc.name, rpc.request.name, rpc.response.name
    )
}

/// Write description lines as `//` comments, skipping blank ones
fn write_descs(f: &mut fmt::Formatter<'_>, indent: &str, descs: &[String]) -> fmt::Result {
    for desc in descs {
        let desc = desc.trim();
        if !desc.is_empty() {
            writeln!(f, "{}// {}", indent, desc)?;
        }
    }
    Ok(())
}

//! The validated program and its XML form.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <program language="IPPcode23">
//!   <instruction order="1" opcode="MOVE">
//!     <arg1 type="var">GF@x</arg1>
//!     <arg2 type="string">hello</arg2>
//!   </instruction>
//! </program>
//! ```

use std::fmt::Write as _;
use std::io;

use itertools::Itertools;

use crate::error::Error;
use crate::validate::Instruction;

pub const LANGUAGE: &str = "IPPcode23";

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Program {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Vec<Instruction>,
}

/// Replaces the characters XML reserves in text and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions, ..Default::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn root_attributes(&self) -> String {
        let optional = [("name", self.name.as_deref()), ("description", self.description.as_deref())];
        std::iter::once(format!(r#"language="{}""#, LANGUAGE))
            .chain(optional.iter().filter_map(|&(key, value)| {
                value.map(|value| format!(r#"{}="{}""#, key, escape(value)))
            }))
            .join(" ")
    }

    fn write_instruction(out: &mut String, instruction: &Instruction) -> std::fmt::Result {
        let attributes = format!(r#"order="{}" opcode="{}""#, instruction.order, instruction.opcode);
        if instruction.arguments.is_empty() {
            return writeln!(out, "  <instruction {}/>", attributes);
        }

        writeln!(out, "  <instruction {}>", attributes)?;
        for (i, argument) in instruction.arguments.iter().enumerate() {
            writeln!(
                out,
                r#"    <arg{n} type="{ty}">{value}</arg{n}>"#,
                n = i + 1,
                ty = argument.ty,
                value = escape(&argument.value),
            )?;
        }
        writeln!(out, "  </instruction>")
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_document(&mut out);
        out
    }

    fn write_document(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, "<program {}>", self.root_attributes())?;
        for instruction in &self.instructions {
            Self::write_instruction(out, instruction)?;
        }
        writeln!(out, "</program>")
    }

    pub fn write_xml(&self, mut writer: impl io::Write) -> Result<(), Error> {
        writer.write_all(self.to_xml().as_bytes())
            .and_then(|()| writer.flush())
            .map_err(Error::Output)
    }
}

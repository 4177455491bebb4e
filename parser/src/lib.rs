//! Translating IPPcode23 source into its XML representation.
//!
//! ```
//! # use ippcode23_parser::{parse, LeniencyLevel};
//! let source = ".IPPcode23\nMOVE GF@x string@hello # greet\n";
//! let program = parse(source, LeniencyLevel::Strict).unwrap();
//! assert!(program.to_xml().contains(r#"<arg2 type="string">hello</arg2>"#));
//! ```
//!
//! Processing stops at the first problem; there is no partial output.

pub mod classify;
pub mod error;
pub mod header;
pub mod lexer;
pub mod program;
pub mod schema;
pub mod validate;

use tracing::debug;

pub use crate::error::{Error, ErrorKind};
pub use crate::program::Program;

use crate::header::check_header;
use crate::lexer::Lexer;
use crate::validate::Validator;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LeniencyLevel {
    Lenient,
    Strict,
}

impl LeniencyLevel {
    /// Whether `.IPPcode22` is taken as the header too.
    pub fn legacy_header_allowed(&self) -> bool {
        match self {
            LeniencyLevel::Lenient => true,
            LeniencyLevel::Strict => false,
        }
    }
}

impl Default for LeniencyLevel {
    fn default() -> Self {
        LeniencyLevel::Strict
    }
}

/// Checks the header, then validates every following line in order.
pub fn parse(src: &str, leniency: LeniencyLevel) -> Result<Program, Error> {
    let mut lines = Lexer::new(src);
    check_header(lines.next().as_ref(), leniency)?;

    let mut validator = Validator::new()?;
    let instructions = lines
        .map(|line| validator.validate(&line))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(instructions = instructions.len(), "parsed program");
    Ok(Program::new(instructions))
}

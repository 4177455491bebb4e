use std::io;

use annotate_snippets::display_list::FormatOptions;
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};
use thiserror::Error;

use crate::lexer::{Line, Span};
use crate::schema::{ArgKind, Opcode};

/// Where in the source an error was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// 1-based physical line number.
    pub line: usize,
    /// The physical line, as written.
    pub src: String,
    /// Byte range of the offending text within `src`.
    pub span: Span,
}

impl Location {
    pub fn new(line: &Line<'_>, span: Span) -> Self {
        Self {
            line: line.number,
            src: line.src.to_string(),
            span,
        }
    }

    fn char_range(&self) -> (usize, usize) {
        let (start, end) = self.span;
        let start_chars = self.src[..start].chars().count();
        (start_chars, start_chars + self.src[start..end].chars().count())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing or malformed `.IPPcode23` header")]
    MissingHeader { location: Option<Location> },

    #[error("line {}: unknown opcode `{opcode}`", .location.line)]
    UnknownOpcode { location: Location, opcode: String },

    #[error("line {}: {opcode} takes {expected} operand(s), found {found}", .location.line)]
    WrongArgumentCount { location: Location, opcode: Opcode, expected: usize, found: usize },

    #[error("line {}: operand {position} of {opcode} must be a {kind}, found `{token}`", .location.line)]
    InvalidArgument { location: Location, opcode: Opcode, position: usize, kind: ArgKind, token: String },

    #[error("could not read input: {0}")]
    Input(#[source] io::Error),

    #[error("could not write output: {0}")]
    Output(#[source] io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`], one per exit status.
///
/// A wrong operand count and a malformed operand are both [`ErrorKind::Syntax`].
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Header,
    Opcode,
    Syntax,
    Input,
    Output,
    Internal,
}

impl ErrorKind {
    pub fn exit_code(&self) -> i32 {
        use ErrorKind::*;
        match self {
            Input => 11,
            Output => 12,
            Header => 21,
            Opcode => 22,
            Syntax => 23,
            Internal => 99,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            MissingHeader { .. } => ErrorKind::Header,
            UnknownOpcode { .. } => ErrorKind::Opcode,
            WrongArgumentCount { .. } | InvalidArgument { .. } => ErrorKind::Syntax,
            Input(_) => ErrorKind::Input,
            Output(_) => ErrorKind::Output,
            Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        use Error::*;
        match self {
            MissingHeader { location } => location.as_ref(),
            UnknownOpcode { location, .. }
            | WrongArgumentCount { location, .. }
            | InvalidArgument { location, .. } => Some(location),
            Input(_) | Output(_) | Internal(_) => None,
        }
    }

    fn annotation_label(&self) -> &'static str {
        use Error::*;
        match self {
            MissingHeader { .. } => "expected `.IPPcode23` here",
            UnknownOpcode { .. } => "unknown opcode here",
            WrongArgumentCount { .. } => "wrong number of operands",
            InvalidArgument { .. } => "invalid operand here",
            Input(_) | Output(_) | Internal(_) => "",
        }
    }

    fn slices<'a>(&'a self, origin: Option<&'a str>) -> Vec<Slice<'a>> {
        let mut slices = Vec::new();
        if let Some(location) = self.location() {
            slices.push(
                Slice {
                    source: &location.src,
                    line_start: location.line,
                    origin,
                    fold: false,
                    annotations: vec![
                        SourceAnnotation {
                            range: location.char_range(),
                            label: self.annotation_label(),
                            annotation_type: AnnotationType::Error,
                        }
                    ],
                }
            );
        }
        slices
    }

    /// Builds a diagnostic pointing at the offending source text.
    ///
    /// `message` is usually this error's `to_string()`; it is borrowed by the snippet.
    pub fn create_snippet<'a>(&'a self, message: &'a str, origin: Option<&'a str>, color: bool) -> Snippet<'a> {
        Snippet {
            title: Some(Annotation {
                label: Some(message),
                id: None,
                annotation_type: AnnotationType::Error,
            }),
            footer: vec![],
            slices: self.slices(origin),
            opt: FormatOptions {
                color,
                ..Default::default()
            },
        }
    }
}

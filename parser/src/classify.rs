//! Deciding which literal form an operand token takes.
//!
//! Each [`ArgKind`] owns an ordered list of patterns. A token is tried against the
//! patterns of its kind in order and the first one that matches the *whole* token wins,
//! so the order of [`Classifier::SYMBOL_PATTERNS`] matters: `nil@nil` has to be claimed
//! before anything broader gets a chance at it.

use regex::Regex;
use std::fmt::{Display, Formatter};
use tracing::trace;

use crate::error::Error;
use crate::schema::ArgKind;

/// The concrete form of a classified operand, written to its `type` attribute.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum LiteralType {
    Var,
    Bool,
    Nil,
    Int,
    String,
    Label,
    Type,
}

impl LiteralType {
    pub fn as_str(&self) -> &'static str {
        use LiteralType::*;
        match self {
            Var => "var",
            Bool => "bool",
            Nil => "nil",
            Int => "int",
            String => "string",
            Label => "label",
            Type => "type",
        }
    }
}

impl Display for LiteralType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified operand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Argument {
    pub ty: LiteralType,
    /// The literal as the consumer should see it, e.g. `42` for `int@42`.
    /// Radix prefixes, digit separators and string escapes are left as written.
    pub value: String,
}

impl Argument {
    pub fn new(ty: LiteralType, value: impl Into<String>) -> Self {
        Self { ty, value: value.into() }
    }
}

// Starts with a letter or one of `_-$&%*!?`, continues with the same or digits.
const IDENTIFIER: &str = r"[_\-$&%*!?a-zA-Z][_\-$&%*!?a-zA-Z0-9]*";

// Frame prefixes are case-sensitive.
const VARIABLE: &str = r"((?:GF|LF|TF)@[_\-$&%*!?a-zA-Z][_\-$&%*!?a-zA-Z0-9]*)";

// Decimal (no leading zeros), 0x hexadecimal or 0/0o octal, all with optional sign
// and `_` between digit groups.
const INTEGER: &str = concat!(
    r"int@([+-]?(?:",
    r"0[xX][0-9a-fA-F]+(?:_[0-9a-fA-F]+)*",
    r"|0[oO]?[0-7]+(?:_[0-7]+)*",
    r"|[1-9][0-9]*(?:_[0-9]+)*",
    r"|0",
    r"))",
);

// A backslash must introduce exactly three decimal digits.
const STRING: &str = r"string@((?:\\[0-9]{3}|[^\\])*)";

type Pattern = (Regex, LiteralType);

pub struct Classifier {
    variable: Vec<Pattern>,
    symbol: Vec<Pattern>,
    label: Vec<Pattern>,
    type_name: Vec<Pattern>,
}

impl Classifier {
    // Registering a pattern anchors it at both ends, so don't use ^ or $.
    // Group 1 of every pattern is the value handed to the consumer.
    const VARIABLE_PATTERNS: [(&'static str, LiteralType); 1] = [
        (VARIABLE, LiteralType::Var),
    ];

    const SYMBOL_PATTERNS: [(&'static str, LiteralType); 5] = [
        (VARIABLE,             LiteralType::Var),
        (r"bool@(true|false)", LiteralType::Bool),
        (r"nil@(nil)",         LiteralType::Nil),
        (INTEGER,              LiteralType::Int),
        (STRING,               LiteralType::String),
    ];

    const TYPE_PATTERNS: [(&'static str, LiteralType); 1] = [
        (r"(int|string|bool)", LiteralType::Type),
    ];

    pub fn new() -> Result<Self, Error> {
        let label_pattern = format!("({})", IDENTIFIER);
        Ok(Classifier {
            variable: Self::register_patterns(&Self::VARIABLE_PATTERNS)?,
            symbol: Self::register_patterns(&Self::SYMBOL_PATTERNS)?,
            label: Self::register_patterns(&[(label_pattern.as_str(), LiteralType::Label)])?,
            type_name: Self::register_patterns(&Self::TYPE_PATTERNS)?,
        })
    }

    fn register_patterns(patterns: &[(&str, LiteralType)]) -> Result<Vec<Pattern>, Error> {
        patterns.iter()
            .map(|(pattern, ty)| {
                assert!(!pattern.starts_with('^') && !pattern.ends_with('$'));
                let anchored = format!("^{}$", pattern);
                Regex::new(&anchored)
                    .map(|regex| (regex, *ty))
                    .map_err(|e| Error::Internal(format!("invalid pattern for {}: {}", ty, e)))
            })
            .collect()
    }

    fn patterns(&self, kind: ArgKind) -> &[Pattern] {
        match kind {
            ArgKind::Variable => &self.variable,
            ArgKind::Symbol => &self.symbol,
            ArgKind::Label => &self.label,
            ArgKind::Type => &self.type_name,
        }
    }

    /// Classifies `token` as an operand of the given kind.
    ///
    /// Returns `None` when no form allowed for `kind` matches the whole token.
    pub fn classify(&self, kind: ArgKind, token: &str) -> Option<Argument> {
        let argument = self.patterns(kind).iter()
            .find_map(|(regex, ty)| {
                regex.captures(token)
                    .and_then(|captures| captures.get(1))
                    .map(|value| Argument::new(*ty, value.as_str()))
            });
        trace!(%kind, token, classified = ?argument.as_ref().map(|a| a.ty), "classified operand");
        argument
    }
}

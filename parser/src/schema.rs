use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The grammatical role an operand slot plays in an instruction.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ArgKind {
    /// A variable reference such as `GF@counter`.
    Variable,
    /// A variable reference or a `bool`, `nil`, `int` or `string` constant.
    Symbol,
    Label,
    /// One of the type names `int`, `string` or `bool`.
    Type,
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ArgKind::*;
        match self {
            Variable => write!(f, "variable"),
            Symbol => write!(f, "symbol"),
            Label => write!(f, "label"),
            Type => write!(f, "type"),
        }
    }
}

/// An IPPcode23 instruction.
///
/// Represents a *case-insensitive* string in the source code,
/// so `move`, `Move` and `MOVE` all parse to [`Opcode::Move`].
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Opcode {
    // Frames and calls
    Move,
    CreateFrame,
    PushFrame,
    PopFrame,
    DefVar,
    Call,
    Return,

    // Data stack
    PushS,
    PopS,

    // Arithmetic, relational, boolean and conversion
    Add,
    Sub,
    Mul,
    IDiv,
    Lt,
    Gt,
    Eq,
    And,
    Or,
    Not,
    Int2Char,
    Stri2Int,

    // I/O
    Read,
    Write,

    // Strings
    Concat,
    StrLen,
    GetChar,
    SetChar,

    // Types
    Type,

    // Control flow
    Label,
    Jump,
    JumpIfEq,
    JumpIfNeq,
    Exit,

    // Debugging
    DPrint,
    Break,
}

use ArgKind::{Label as L, Symbol as S, Type as T, Variable as V};

impl Opcode {
    pub const ALL: [Opcode; 35] = [
        Opcode::Move,
        Opcode::CreateFrame,
        Opcode::PushFrame,
        Opcode::PopFrame,
        Opcode::DefVar,
        Opcode::Call,
        Opcode::Return,
        Opcode::PushS,
        Opcode::PopS,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::IDiv,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Eq,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Int2Char,
        Opcode::Stri2Int,
        Opcode::Read,
        Opcode::Write,
        Opcode::Concat,
        Opcode::StrLen,
        Opcode::GetChar,
        Opcode::SetChar,
        Opcode::Type,
        Opcode::Label,
        Opcode::Jump,
        Opcode::JumpIfEq,
        Opcode::JumpIfNeq,
        Opcode::Exit,
        Opcode::DPrint,
        Opcode::Break,
    ];

    /// The uppercase mnemonic, as written to the `opcode` attribute.
    pub fn as_str(&self) -> &'static str {
        use Opcode::*;
        match self {
            Move => "MOVE",
            CreateFrame => "CREATEFRAME",
            PushFrame => "PUSHFRAME",
            PopFrame => "POPFRAME",
            DefVar => "DEFVAR",
            Call => "CALL",
            Return => "RETURN",
            PushS => "PUSHS",
            PopS => "POPS",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            IDiv => "IDIV",
            Lt => "LT",
            Gt => "GT",
            Eq => "EQ",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Int2Char => "INT2CHAR",
            Stri2Int => "STRI2INT",
            Read => "READ",
            Write => "WRITE",
            Concat => "CONCAT",
            StrLen => "STRLEN",
            GetChar => "GETCHAR",
            SetChar => "SETCHAR",
            Type => "TYPE",
            Label => "LABEL",
            Jump => "JUMP",
            JumpIfEq => "JUMPIFEQ",
            JumpIfNeq => "JUMPIFNEQ",
            Exit => "EXIT",
            DPrint => "DPRINT",
            Break => "BREAK",
        }
    }

    /// The operand kinds this instruction requires, in order. The arity is the length.
    pub fn operands(&self) -> &'static [ArgKind] {
        use Opcode::*;
        match self {
            CreateFrame | PushFrame | PopFrame | Return | Break => &[],

            DefVar | PopS => &[V],
            Call | Label | Jump => &[L],
            PushS | Write | Exit | DPrint => &[S],

            Move | Not | Int2Char | StrLen | Type => &[V, S],
            Read => &[V, T],

            Add | Sub | Mul | IDiv
            | Lt | Gt | Eq
            | And | Or
            | Stri2Int | Concat | GetChar | SetChar => &[V, S, S],

            JumpIfEq | JumpIfNeq => &[L, S, S],
        }
    }

    pub fn arity(&self) -> usize {
        self.operands().len()
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|opcode| opcode.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownOpcode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn has_35_distinct_instructions() {
        let names = Opcode::ALL.iter().map(Opcode::as_str).collect::<HashSet<_>>();
        assert_eq!(names.len(), 35);
    }

    #[test]
    fn mnemonics_round_trip() {
        for opcode in Opcode::ALL.iter() {
            assert_eq!(opcode.as_str().parse::<Opcode>(), Ok(*opcode));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!("move".parse::<Opcode>(), Ok(Opcode::Move));
        assert_eq!("Move".parse::<Opcode>(), Ok(Opcode::Move));
        assert_eq!("jumpIfNeq".parse::<Opcode>(), Ok(Opcode::JumpIfNeq));
    }

    #[test]
    fn unknown_mnemonic_is_rejected() {
        assert_eq!("FOOBAR".parse::<Opcode>(), Err(UnknownOpcode("FOOBAR".to_string())));
        assert_eq!("".parse::<Opcode>(), Err(UnknownOpcode(String::new())));
    }

    #[test]
    fn only_ascii_letters_fold_case() {
        assert_eq!("pu\u{017F}hs".parse::<Opcode>(), Err(UnknownOpcode("pu\u{017F}hs".to_string())));
        assert_eq!("\u{0131}div".parse::<Opcode>(), Err(UnknownOpcode("\u{0131}div".to_string())));
    }

    #[test]
    fn operand_kinds() {
        assert!(Opcode::CreateFrame.operands().is_empty());
        assert_eq!(Opcode::DefVar.operands(), &[ArgKind::Variable]);
        assert_eq!(Opcode::Call.operands(), &[ArgKind::Label]);
        assert_eq!(Opcode::Move.operands(), &[ArgKind::Variable, ArgKind::Symbol]);
        assert_eq!(Opcode::Read.operands(), &[ArgKind::Variable, ArgKind::Type]);
        assert_eq!(Opcode::Concat.operands(), &[ArgKind::Variable, ArgKind::Symbol, ArgKind::Symbol]);
        assert_eq!(Opcode::JumpIfEq.operands(), &[ArgKind::Label, ArgKind::Symbol, ArgKind::Symbol]);
    }

    #[test]
    fn arities_span_zero_to_three() {
        let arities = Opcode::ALL.iter().map(Opcode::arity).collect::<HashSet<_>>();
        assert_eq!(arities, vec![0, 1, 2, 3].into_iter().collect::<HashSet<_>>());
    }
}

use tracing::debug;

use crate::classify::{Argument, Classifier};
use crate::error::{Error, Location};
use crate::lexer::Line;
use crate::schema::{Opcode, UnknownOpcode};

/// An instruction whose opcode, operand count and operand forms have all been checked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Instruction {
    /// 1-based position among the instructions of the program.
    pub order: usize,
    pub opcode: Opcode,
    /// One per operand, in source order; `arguments[0]` is `arg1`.
    pub arguments: Vec<Argument>,
}

/// Turns tokenized lines into [`Instruction`]s, numbering them as it goes.
pub struct Validator {
    classifier: Classifier,
    next_order: usize,
}

impl Validator {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            classifier: Classifier::new()?,
            next_order: 1,
        })
    }

    pub fn validate(&mut self, line: &Line<'_>) -> Result<Instruction, Error> {
        let order = self.next_order;
        self.next_order += 1;

        let (mnemonic, operands) = match line.tokens.split_first() {
            Some(split) => split,
            None => return Err(Error::Internal(format!("line {} has no tokens", line.number))),
        };

        let opcode = mnemonic.src.parse::<Opcode>()
            .map_err(|UnknownOpcode(opcode)| Error::UnknownOpcode {
                location: Location::new(line, mnemonic.span),
                opcode,
            })?;

        let kinds = opcode.operands();
        if kinds.len() != operands.len() {
            return Err(Error::WrongArgumentCount {
                location: Location::new(line, line.content_span()),
                opcode,
                expected: kinds.len(),
                found: operands.len(),
            });
        }

        let arguments = kinds.iter()
            .zip(operands)
            .enumerate()
            .map(|(i, (kind, token))| {
                self.classifier.classify(*kind, token.src)
                    .ok_or_else(|| Error::InvalidArgument {
                        location: Location::new(line, token.span),
                        opcode,
                        position: i + 1,
                        kind: *kind,
                        token: token.src.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(order, %opcode, line = line.number, "validated instruction");
        Ok(Instruction { order, opcode, arguments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LiteralType;
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::schema::ArgKind;

    use pretty_assertions::assert_eq;

    fn validate_all(src: &str) -> Vec<Result<Instruction, Error>> {
        let mut validator = Validator::new().unwrap();
        Lexer::new(src).map(|line| validator.validate(&line)).collect()
    }

    fn validate_one(src: &str) -> Result<Instruction, Error> {
        validate_all(src).remove(0)
    }

    #[test]
    fn move_with_string() {
        let instruction = validate_one("MOVE GF@x string@hello").unwrap();
        assert_eq!(instruction, Instruction {
            order: 1,
            opcode: Opcode::Move,
            arguments: vec![
                Argument::new(LiteralType::Var, "GF@x"),
                Argument::new(LiteralType::String, "hello"),
            ],
        });
    }

    #[test]
    fn opcode_case_is_normalized() {
        for src in &["move GF@x int@1", "Move GF@x int@1", "MOVE GF@x int@1"] {
            assert_eq!(validate_one(src).unwrap().opcode, Opcode::Move);
        }
    }

    #[test]
    fn orders_are_contiguous() {
        let src = "CREATEFRAME\n\n# comment\nPUSHFRAME # inline\n   \nPOPFRAME\n";
        let orders = validate_all(src).into_iter()
            .map(|instruction| instruction.unwrap().order)
            .collect::<Vec<_>>();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_opcode() {
        let error = validate_one("FOOBAR GF@x").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Opcode);
        match error {
            Error::UnknownOpcode { location, opcode } => {
                assert_eq!(opcode, "FOOBAR");
                assert_eq!(location.span, (0, 6));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn too_few_operands() {
        match validate_one("MOVE GF@x").unwrap_err() {
            Error::WrongArgumentCount { opcode, expected, found, .. } => {
                assert_eq!(opcode, Opcode::Move);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn too_many_operands() {
        let error = validate_one("BREAK int@1").unwrap_err();
        assert!(matches!(error, Error::WrongArgumentCount { expected: 0, found: 1, .. }));
        assert_eq!(error.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn invalid_operand_reports_position_and_kind() {
        match validate_one("ADD GF@x int@1 int@abc").unwrap_err() {
            Error::InvalidArgument { location, opcode, position, kind, token } => {
                assert_eq!(opcode, Opcode::Add);
                assert_eq!(position, 3);
                assert_eq!(kind, ArgKind::Symbol);
                assert_eq!(token, "int@abc");
                assert_eq!(location.span, (15, 22));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn operands_are_checked_against_their_slot() {
        assert!(validate_one("DEFVAR int@1").is_err());
        assert!(validate_one("JUMP GF@x").is_err());
        assert!(validate_one("READ GF@x float").is_err());
        assert!(validate_one("READ GF@x bool").is_ok());
        assert!(validate_one("JUMPIFEQ end GF@x nil@nil").is_ok());
    }

    #[test]
    fn failed_line_still_consumes_its_order() {
        let mut validator = Validator::new().unwrap();
        let lines = Lexer::new("LABEL 1bad\nLABEL good").collect::<Vec<_>>();
        assert!(validator.validate(&lines[0]).is_err());
        assert_eq!(validator.validate(&lines[1]).unwrap().order, 2);
    }
}

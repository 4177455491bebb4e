use tracing::debug;

use crate::error::{Error, Location};
use crate::lexer::Line;
use crate::LeniencyLevel;

pub const HEADER: &str = ".IPPcode23";

/// Header of the previous language revision, accepted only when lenient.
pub const LEGACY_HEADER: &str = ".IPPcode22";

/// Checks that the first non-empty line is the language header and nothing else.
///
/// The header must be the only token on its line: `.IPPcode23 BREAK` is rejected
/// rather than read as a header followed by an instruction.
pub fn check_header(first_line: Option<&Line<'_>>, leniency: LeniencyLevel) -> Result<(), Error> {
    let line = first_line.ok_or(Error::MissingHeader { location: None })?;

    let accepted = match line.tokens.as_slice() {
        [token] => {
            token.src.eq_ignore_ascii_case(HEADER)
                || (leniency.legacy_header_allowed() && token.src.eq_ignore_ascii_case(LEGACY_HEADER))
        }
        _ => false,
    };

    if accepted {
        debug!(line = line.number, "found header");
        Ok(())
    } else {
        Err(Error::MissingHeader { location: Some(Location::new(line, line.content_span())) })
    }
}

//! Splitting IPPcode23 source into lines of whitespace-delimited tokens.
//!
//! Comments run from the first `#` to the end of the physical line and are dropped,
//! along with any line that has nothing left in it afterwards.

/// Byte range of a token within its physical line.
pub type Span = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'input> {
    pub src: &'input str,
    pub span: Span,
}

/// A physical source line that still has at least one token after comment stripping.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'input> {
    /// 1-based physical line number.
    pub number: usize,
    /// The whole physical line, comment included, without its line terminator.
    pub src: &'input str,
    pub tokens: Vec<Token<'input>>,
}

impl<'input> Line<'input> {
    /// Span covering every token on the line.
    pub fn content_span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => (first.span.0, last.span.1),
            _ => (0, 0),
        }
    }
}

pub struct Lexer<'input> {
    lines: std::iter::Enumerate<std::str::Lines<'input>>,
}

impl<'input> Lexer<'input> {
    const COMMENT_START: char = '#';

    // ASCII whitespace only; U+00A0 and friends belong to the token.
    fn is_separator(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\x0B' | '\x0C' | '\r' | '\n')
    }

    pub fn new(src: &'input str) -> Lexer<'input> {
        Lexer {
            // `lines` strips both "\n" and "\r\n".
            lines: src.lines().enumerate(),
        }
    }

    fn tokenize(line: &'input str) -> Vec<Token<'input>> {
        let content = match line.find(Self::COMMENT_START) {
            Some(comment_start) => &line[..comment_start],
            None => line,
        };

        let mut tokens = Vec::new();
        let mut start = None;
        for (i, c) in content.char_indices() {
            match (Self::is_separator(c), start) {
                (true, Some(s)) => {
                    tokens.push(Token { src: &content[s..i], span: (s, i) });
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Token { src: &content[s..], span: (s, content.len()) });
        }
        tokens
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Line<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        for (i, src) in &mut self.lines {
            let tokens = Self::tokenize(src);
            if !tokens.is_empty() {
                return Some(Line { number: i + 1, src, tokens });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn token_texts<'a>(line: &Line<'a>) -> Vec<&'a str> {
        line.tokens.iter().map(|token| token.src).collect()
    }

    #[test]
    fn splits_on_runs_of_whitespace() {
        let mut lexer = Lexer::new("  MOVE \t GF@x   int@1  ");
        let line = lexer.next().unwrap();
        assert_eq!(token_texts(&line), vec!["MOVE", "GF@x", "int@1"]);
        assert_eq!(line.tokens[0].span, (2, 6));
        assert_eq!(line.tokens[2].span, (16, 21));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn strips_comments_and_drops_empty_lines() {
        let input = ".IPPcode23 # header\n\n   \n# only a comment\nWRITE string@a#b\n";
        let lines = Lexer::new(input).collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(token_texts(&lines[0]), vec![".IPPcode23"]);
        assert_eq!(lines[1].number, 5);
        assert_eq!(token_texts(&lines[1]), vec!["WRITE", "string@a"]);
    }

    #[test]
    fn only_ascii_whitespace_separates_tokens() {
        let line = Lexer::new("WRITE\x0Bstring@a\u{00A0}b\x0C string@c\u{2003}d").next().unwrap();
        assert_eq!(token_texts(&line), vec!["WRITE", "string@a\u{00A0}b", "string@c\u{2003}d"]);
    }

    #[test]
    fn crlf_and_lf_are_equivalent() {
        let unix = Lexer::new("A B\nC\n").collect::<Vec<_>>();
        let windows = Lexer::new("A B\r\nC\r\n").collect::<Vec<_>>();
        assert_eq!(unix, windows);
    }

    #[test]
    fn content_span_covers_tokens_only() {
        let line = Lexer::new("  PUSHS  int@3 # push").next().unwrap();
        assert_eq!(line.content_span(), (2, 14));
        assert_eq!(line.src, "  PUSHS  int@3 # push");
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert_eq!(Lexer::new("").count(), 0);
        assert_eq!(Lexer::new("\n\r\n # nothing\n").count(), 0);
    }
}

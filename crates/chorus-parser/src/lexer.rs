//! Lexical analyzer for Chorus source text.
//!
//! The lexer converts source text into a stream of [`Token`]s. At each
//! position the token classes are tried in a fixed priority order and the
//! first one that starts there consumes its whole token:
//!
//! 1. `#` comment, up to (not including) the next newline; discarded
//! 2. `"..."` and `'...'` quoted strings with `\n` / `\<char>` escapes
//! 3. bare words, running until whitespace or one of `: + - < > ,`
//! 4. symbol runs of `+ - < >`, so `->` and `<-->` are single tokens
//! 5. `,` and `:`
//! 6. newline
//!
//! Any other character (spaces, tabs, carriage returns) is inert separator
//! text attached to the next token. Every class is a pure winnow parser over
//! the remaining input; nothing is shared between calls.

use log::debug;
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{any, none_of, take_till, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
    tokens::Token,
};

type Input<'a> = &'a str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Characters that end a bare word.
const WORD_BREAKS: [char; 10] = [' ', '\t', '\r', '\n', ':', '+', '-', '<', '>', ','];

/// Characters that make up symbol runs such as `->` or `<-->`.
const SYMBOLS: [char; 4] = ['+', '-', '<', '>'];

/// Characters an escape cannot consume; a backslash before one of these is
/// kept literally.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// What a token class produced at the head of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme<'a> {
    Comment,
    Quoted(String),
    Word(&'a str),
    Symbols(&'a str),
    Comma,
    Colon,
    Newline,
}

/// Parse a `#` comment up to the end of the line or input.
fn comment<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    preceded('#', take_till(0.., '\n'))
        .value(Lexeme::Comment)
        .parse_next(input)
}

/// Parse the character after a backslash inside a quoted string.
///
/// `\n` is a newline; any other character stands for itself.
fn escape<'a>(input: &mut Input<'a>) -> IResult<char> {
    preceded('\\', none_of(LINE_TERMINATORS))
        .map(|c| if c == 'n' { '\n' } else { c })
        .parse_next(input)
}

/// Parse a string delimited by `quote`. Literal newlines are allowed.
///
/// Once the opening quote has matched the parser is committed: reaching the
/// end of the input before the closing quote is a cut error.
fn quoted<'a>(quote: char) -> impl FnMut(&mut Input<'a>) -> IResult<Lexeme<'a>> {
    move |input: &mut Input<'a>| {
        let content = repeat(0.., alt((escape, none_of(quote)))).fold(
            String::new,
            |mut acc: String, c: char| {
                acc.push(c);
                acc
            },
        );

        preceded(quote, cut_err(terminated(content, quote)))
            .map(Lexeme::Quoted)
            .parse_next(input)
    }
}

fn word<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    take_while(1.., |c: char| !WORD_BREAKS.contains(&c))
        .map(Lexeme::Word)
        .parse_next(input)
}

fn symbols<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    take_while(1.., SYMBOLS)
        .map(Lexeme::Symbols)
        .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    alt((
        ','.value(Lexeme::Comma),
        ':'.value(Lexeme::Colon),
        '\n'.value(Lexeme::Newline),
    ))
    .parse_next(input)
}

/// Parse one token of whichever class starts at the head of the input.
fn lexeme<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    alt((
        comment,     // Must come before words; `#` is a word character
        quoted('"'), // Quotes are word characters too
        quoted('\''),
        word,
        symbols,
        punctuation,
    ))
    .parse_next(input)
}

/// Lexer state: the tokens so far and the separator text waiting to be
/// attached to the next token.
struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    separator: String,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            separator: String::new(),
        }
    }

    /// Byte offset of `input` within the source.
    fn offset(&self, input: Input<'a>) -> usize {
        self.source.len() - input.len()
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut input: Input<'a> = self.source;

        while !input.is_empty() {
            let before = input;
            let start = self.offset(input);
            match lexeme(&mut input) {
                Ok(Lexeme::Comment) => {
                    // Comments swallow the whitespace that led up to them.
                    self.separator.clear();
                }
                Ok(lexeme) => {
                    let end = self.offset(input);
                    self.push(lexeme, Span::new(start..end));
                }
                Err(ErrMode::Backtrack(_)) => {
                    // No class starts here: the character is separator text.
                    input = before;
                    let c = any::<_, ErrMode<ContextError>>
                        .parse_next(&mut input)
                        .map_err(|_| self.unterminated(start))?;
                    self.separator.push(c);
                }
                Err(_) => return Err(self.unterminated(start)),
            }
        }

        Ok(self.tokens)
    }

    fn push(&mut self, lexeme: Lexeme<'a>, span: Span) {
        let (value, quoted) = match lexeme {
            Lexeme::Quoted(value) => (value, true),
            Lexeme::Word(value) | Lexeme::Symbols(value) => (value.to_string(), false),
            Lexeme::Comma => (",".to_string(), false),
            Lexeme::Colon => (":".to_string(), false),
            Lexeme::Newline => ("\n".to_string(), false),
            Lexeme::Comment => return,
        };

        self.tokens.push(Token {
            separator: std::mem::take(&mut self.separator),
            value,
            quoted,
            span,
        });
    }

    fn unterminated(&self, start: usize) -> Diagnostic {
        let quote = self.source[start..].chars().next().unwrap_or('"');
        Diagnostic::error("unterminated token")
            .with_code(ErrorCode::E001)
            .with_label(
                Span::new(start..self.source.len()),
                "string starts here and never ends",
            )
            .with_help(format!("add a closing `{quote}`"))
    }
}

/// Convert source text into tokens.
///
/// # Errors
///
/// Returns a [`ParseError`] with code [`ErrorCode::E001`] if the input ends
/// inside a quoted string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(); "Tokenized source");
    Ok(tokens)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Rebuild the text a token sequence covers, the way labels are rebuilt.
    fn rebuild(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| format!("{}{}", t.separator, t.value))
            .collect()
    }

    fn check_unquoted_text_round_trips(source: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let trimmed = source.trim_end_matches([' ', '\t', '\r']);
        prop_assert_eq!(rebuild(&tokens), trimmed);
        Ok(())
    }

    fn check_spans_are_ordered(source: &str) -> Result<(), TestCaseError> {
        if let Ok(tokens) = tokenize(source) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].span.end() <= pair[1].span.start());
            }
            for token in &tokens {
                prop_assert!(token.span.end() <= source.len());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn unquoted_text_round_trips(source in "[a-zA-Z0-9 \t:,<>+\\-\n]{0,60}") {
            check_unquoted_text_round_trips(&source)?;
        }

        #[test]
        fn tokenize_never_panics(source in "\\PC{0,80}") {
            check_spans_are_ordered(&source)?;
        }
    }
}

//! # Chorus Parser
//!
//! Front end for the Chorus sequence diagram language. Source text flows
//! through four phases, each of which is also available on its own:
//!
//! 1. [`tokenize`] turns text into [`Token`]s that remember their leading
//!    whitespace.
//! 2. [`split_lines`] groups tokens into [`Line`]s.
//! 3. [`parse_line`] / [`parse_lines`] classify each line as a metadata
//!    update or a [`RawStatement`].
//! 4. [`generate`] normalizes the statements into a
//!    [`Sequence`](chorus_core::Sequence): agents ordered and shown before
//!    use, blocks nested, and everything closed at the end.
//!
//! Every phase stops at the first problem and reports a [`ParseError`].
//!
//! ## Usage
//!
//! ```
//! # use chorus_parser::{compile, ParseConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         title Checkout
//!         Shop -> Bank: charge
//!         Bank --> Shop: ok
//!     "#;
//!
//!     let sequence = compile(source, &ParseConfig::default())?;
//!     assert_eq!(sequence.meta.title, "Checkout");
//!     assert_eq!(sequence.agents, vec!["[", "Shop", "Bank", "]"]);
//!     Ok(())
//! }
//! ```

pub mod error;
mod generator;
mod lexer;
mod lines;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod tokens;

pub use error::{Diagnostic, ErrorCode, ParseError};
pub use generator::generate;
pub use lexer::tokenize;
pub use lines::{Line, split_lines};
pub use parser::{parse_line, parse_lines};
pub use parser_types::{
    Arrow, LineOutcome, MetaUpdate, ParseConfig, ParseResult, Participation, RawAgent,
    RawStatement,
};
pub use span::{Span, Spanned};
pub use tokens::Token;

use log::info;

use chorus_core::Sequence;

/// Tokenize and parse source text into metadata and raw statements.
///
/// # Example
///
/// ```
/// # use chorus_parser::{parse, ParseConfig, RawStatement};
///
/// let result = parse("A -> B: hi\nfirst:", &ParseConfig::default()).unwrap();
/// assert_eq!(result.statements.len(), 2);
/// assert_eq!(*result.statements[0], RawStatement::connection("A", "B", "hi"));
/// ```
pub fn parse(source: &str, config: &ParseConfig) -> Result<ParseResult, ParseError> {
    let tokens = tokenize(source)?;
    let lines = split_lines(tokens);
    parse_lines(&lines, config)
}

/// Run the whole pipeline, from source text to a normalized [`Sequence`].
///
/// This is the main entry point. It is a pure function of its arguments:
/// the same source always gives the same sequence.
///
/// # Errors
///
/// Returns a [`ParseError`] holding the diagnostic of the first lexical,
/// line or structural error.
///
/// # Example
///
/// ```
/// # use chorus_parser::{compile, ErrorCode, ParseConfig};
///
/// let err = compile("if\nA -> B", &ParseConfig::default()).unwrap_err();
/// assert_eq!(err.code(), Some(ErrorCode::E203));
/// ```
pub fn compile(source: &str, config: &ParseConfig) -> Result<Sequence, ParseError> {
    info!(bytes = source.len(); "Compiling sequence");
    let result = parse(source, config)?;
    generate(&result)
}

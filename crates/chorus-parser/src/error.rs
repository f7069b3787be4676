//! Error and diagnostic system for the Chorus parser.
//!
//! Every failure in the pipeline is fatal: the tokenizer, the line parser and
//! the generator each stop at the first problem and report it as a
//! [`Diagnostic`] wrapped in a [`ParseError`]. Diagnostics carry an
//! [`ErrorCode`] naming the failure, a primary [`Label`] on the offending
//! source text and, where useful, help text.
//!
//! # Example
//!
//! ```
//! # use chorus_parser::error::{Diagnostic, ErrorCode};
//! # use chorus_parser::Span;
//!
//! let diag = Diagnostic::error("unrecognised command: A B C")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(0..5), "no statement matches this line")
//!     .with_help("connections need an arrow such as `->`");
//! assert_eq!(diag.to_string(), "error[E100]: unrecognised command: A B C");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;

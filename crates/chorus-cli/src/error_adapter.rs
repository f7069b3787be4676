//! Renders [`ChorusError`] values with miette.
//!
//! A parse failure becomes a report carrying the source text, the labels of
//! its diagnostic, and the error code together with the code's description.
//! Other failures are reported by message under a `chorus::` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use chorus::ChorusError;
use chorus_parser::{Span, error::Diagnostic};

/// A [`ChorusError`] prepared for miette's report handlers.
#[derive(Debug)]
pub struct Report<'a> {
    err: &'a ChorusError,
}

impl<'a> Report<'a> {
    pub fn new(err: &'a ChorusError) -> Self {
        Self { err }
    }

    /// The diagnostic and source text of a parse failure.
    fn parse_failure(&self) -> Option<(&'a Diagnostic, &'a String)> {
        match self.err {
            ChorusError::Parse { err, src } => Some((err.diagnostic(), src)),
            _ => None,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parse_failure() {
            Some((diag, _)) => f.write_str(diag.message()),
            None => fmt::Display::fmt(self.err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.err {
            ChorusError::Parse { .. } => None,
            other => std::error::Error::source(other),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self.err {
            ChorusError::Parse { err, .. } => {
                return err.code().map(|code| {
                    Box::new(format!("{code} ({})", code.description())) as Box<dyn fmt::Display>
                });
            }
            ChorusError::Io(_) => "chorus::io",
            ChorusError::Export(_) => "chorus::export",
            ChorusError::Config(_) => "chorus::config",
        };
        Some(Box::new(code))
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        match self.err {
            ChorusError::Parse { err, .. } => err
                .diagnostic()
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            ChorusError::Config(_) => Some(Box::new(
                "check the file passed with --config or chorus/config.toml",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.parse_failure().map(|(_, src)| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (diag, _) = self.parse_failure()?;
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

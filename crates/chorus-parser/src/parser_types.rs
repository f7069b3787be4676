//! Raw statements produced by the line parser.
//!
//! These mirror the source closely: agents are still plain names with their
//! participation flags, and blocks are flat begin/split/end markers. The
//! [`generator`](super::generator) turns a list of them into a
//! [`Sequence`](chorus_core::Sequence).

use std::fmt;

use chorus_core::{BlockMode, LineStyle, Meta, NoteMode, NotePosition, Terminator};

use crate::span::Spanned;

/// Settings for the line parser.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    default_terminators: Terminator,
}

impl ParseConfig {
    /// Create a config whose documents start with the given terminator mode.
    pub fn new(default_terminators: Terminator) -> Self {
        Self {
            default_terminators,
        }
    }

    /// Terminator mode used until a `terminators` line changes it.
    pub fn default_terminators(&self) -> Terminator {
        self.default_terminators
    }

    /// The metadata a document starts with.
    pub(crate) fn initial_meta(&self) -> Meta {
        Meta::with_terminators(self.default_terminators)
    }
}

/// How a connection endpoint's visibility changes around the connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Participation {
    /// No prefix: show the agent if it is hidden.
    #[default]
    Default,
    /// `+` prefix: show the agent before the connection.
    Show,
    /// `-` prefix: hide the agent right after the connection.
    Hide,
}

impl Participation {
    /// Parse a participation prefix token.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "+" => Some(Participation::Show),
            "-" => Some(Participation::Hide),
            _ => None,
        }
    }
}

/// An agent reference as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawAgent {
    pub name: String,
    pub participation: Participation,
}

impl RawAgent {
    /// An agent with no participation flag.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            participation: Participation::Default,
        }
    }

    pub fn with_participation(mut self, participation: Participation) -> Self {
        self.participation = participation;
        self
    }
}

impl fmt::Display for RawAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.participation {
            Participation::Default => {}
            Participation::Show => f.write_str("+")?,
            Participation::Hide => f.write_str("-")?,
        }
        f.write_str(&self.name)
    }
}

/// Line style and arrowheads of a connection operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arrow {
    pub line: LineStyle,
    pub left: bool,
    pub right: bool,
}

impl Arrow {
    /// Look up one of the six connection operators.
    pub fn from_operator(operator: &str) -> Option<Self> {
        let (line, left, right) = match operator {
            "->" => (LineStyle::Solid, false, true),
            "<-" => (LineStyle::Solid, true, false),
            "<->" => (LineStyle::Solid, true, true),
            "-->" => (LineStyle::Dash, false, true),
            "<--" => (LineStyle::Dash, true, false),
            "<-->" => (LineStyle::Dash, true, true),
            _ => return None,
        };
        Some(Self { line, left, right })
    }
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            line: LineStyle::Solid,
            left: false,
            right: true,
        }
    }
}

/// One parsed statement, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStatement {
    BlockBegin {
        mode: BlockMode,
        label: String,
    },
    BlockSplit {
        mode: BlockMode,
        label: String,
    },
    BlockEnd,
    AgentDefine {
        agents: Vec<RawAgent>,
    },
    AgentBegin {
        agents: Vec<RawAgent>,
        mode: Terminator,
    },
    AgentEnd {
        agents: Vec<RawAgent>,
        mode: Terminator,
    },
    Connection {
        /// `[from, to]`
        agents: [RawAgent; 2],
        arrow: Arrow,
        label: String,
    },
    Note {
        position: NotePosition,
        mode: NoteMode,
        agents: Vec<RawAgent>,
        label: String,
    },
    Mark {
        name: String,
    },
    Async {
        target: String,
    },
}

impl RawStatement {
    /// Shorthand for a plain connection `from -> to` with a label.
    pub fn connection(from: &str, to: &str, label: &str) -> Self {
        RawStatement::Connection {
            agents: [RawAgent::named(from), RawAgent::named(to)],
            arrow: Arrow::default(),
            label: label.to_string(),
        }
    }

    /// Short name of the statement kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RawStatement::BlockBegin { .. } => "block-begin",
            RawStatement::BlockSplit { .. } => "block-split",
            RawStatement::BlockEnd => "block-end",
            RawStatement::AgentDefine { .. } => "agent-define",
            RawStatement::AgentBegin { .. } => "agent-begin",
            RawStatement::AgentEnd { .. } => "agent-end",
            RawStatement::Connection { .. } => "connection",
            RawStatement::Note { .. } => "note",
            RawStatement::Mark { .. } => "mark",
            RawStatement::Async { .. } => "async",
        }
    }
}

/// A metadata change made by a `title` or `terminators` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaUpdate {
    Title(String),
    Terminators(Terminator),
}

impl MetaUpdate {
    /// Apply the update to `meta`.
    pub fn apply(&self, meta: &mut Meta) {
        match self {
            MetaUpdate::Title(title) => meta.title.clone_from(title),
            MetaUpdate::Terminators(terminators) => meta.terminators = *terminators,
        }
    }
}

/// What a single line parsed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line changed document metadata and produced no statement.
    Meta(MetaUpdate),
    Statement(RawStatement),
}

/// Metadata and flat statement list for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub meta: Meta,
    pub statements: Vec<Spanned<RawStatement>>,
}

impl ParseResult {
    /// Build a result from statements that have no source location.
    ///
    /// Useful for driving the generator directly.
    pub fn from_statements(meta: Meta, statements: impl IntoIterator<Item = RawStatement>) -> Self {
        Self {
            meta,
            statements: statements.into_iter().map(Spanned::unspanned).collect(),
        }
    }
}

//! The normalized stage tree.
//!
//! A [`Sequence`] is the final output of the generator. Its stages are fully
//! resolved: every agent they mention appears in [`Sequence::agents`], every
//! agent is shown before it is used, and blocks are real trees rather than
//! begin/split/end markers.

use serde::Serialize;

use crate::{
    agent::{LEFT_SENTINEL, RIGHT_SENTINEL},
    meta::{Meta, Terminator},
};

/// The fully resolved intermediate representation of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub meta: Meta,
    /// Agent names in display order. The first entry is always
    /// [`LEFT_SENTINEL`] and the last is always [`RIGHT_SENTINEL`].
    pub agents: Vec<String>,
    pub stages: Vec<Stage>,
}

impl Sequence {
    /// Creates an empty sequence holding only the two sentinel agents.
    pub fn empty(meta: Meta) -> Self {
        Self {
            meta,
            agents: vec![LEFT_SENTINEL.to_string(), RIGHT_SENTINEL.to_string()],
            stages: Vec::new(),
        }
    }
}

/// One normalized unit of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Stage {
    /// A named position that `simultaneously with` lines can jump back to.
    Mark { name: String },
    /// Continue from a previously recorded mark. An empty target means
    /// "the beginning of the diagram".
    ///
    /// The target always names a mark seen earlier in the source, but that
    /// mark may be absent from `stages` when it sat inside a block that was
    /// dropped for having no visible content. Renderers should then treat
    /// the jump as a jump to the point where the dropped block would have
    /// started.
    Async { target: String },
    Connection(Connection),
    AgentBegin {
        agents: Vec<String>,
        mode: Terminator,
    },
    AgentEnd {
        agents: Vec<String>,
        mode: Terminator,
    },
    NoteLeft(Note),
    NoteRight(Note),
    NoteOver(Note),
    NoteBetween(Note),
    Block(Block),
}

impl Stage {
    /// Wraps a note into the stage variant for its position.
    pub fn note(position: NotePosition, note: Note) -> Self {
        match position {
            NotePosition::Left => Stage::NoteLeft(note),
            NotePosition::Right => Stage::NoteRight(note),
            NotePosition::Over => Stage::NoteOver(note),
            NotePosition::Between => Stage::NoteBetween(note),
        }
    }

    /// Returns `true` for stages a renderer draws something for.
    ///
    /// Marks and async jumps only move the vertical cursor, so a block made
    /// of nothing else has no visible content.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Stage::Mark { .. } | Stage::Async { .. })
    }
}

/// Stroke style of a connection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dash,
}

/// A message between two agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    /// `[from, to]` as written in the source.
    pub agents: [String; 2],
    pub line: LineStyle,
    /// Arrowhead on the `from` end.
    pub left: bool,
    /// Arrowhead on the `to` end.
    pub right: bool,
    pub label: String,
}

/// Where a note is placed relative to its agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotePosition {
    Left,
    Right,
    Over,
    Between,
}

/// Visual flavour of a note, taken from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteMode {
    Note,
    Text,
    State,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub agents: Vec<String>,
    pub mode: NoteMode,
    pub label: String,
}

/// The kind of a block or of one of its sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    If,
    Else,
    Repeat,
}

impl BlockMode {
    /// Returns `true` if a block opened with this mode accepts `else`/`elif`.
    pub fn is_splittable(&self) -> bool {
        matches!(self, BlockMode::If)
    }
}

/// A nested region bounded by two virtual agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Name of the virtual agent marking the block's left edge.
    pub left: String,
    /// Name of the virtual agent marking the block's right edge.
    pub right: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub mode: BlockMode,
    pub label: String,
    pub stages: Vec<Stage>,
}

//! Core types for Chorus sequence diagrams.
//!
//! This crate holds the intermediate representation produced by the
//! `chorus-parser` generator and consumed by renderers: a [`Sequence`] with
//! its [`Meta`], the ordered agent list, and the normalized [`Stage`] tree.
//! Every type is plain data and serializes with [`serde`].

pub mod agent;
pub mod meta;
pub mod stage;

pub use meta::{Meta, Terminator, UnknownTerminator};
pub use stage::{
    Block, BlockMode, Connection, LineStyle, Note, NoteMode, NotePosition, Section, Sequence, Stage,
};

//! Line parser for Chorus source.
//!
//! Each [`Line`] is classified by its leading keyword. Keyword forms that do
//! not fit their line (a `define` with no agents, a `note` without a label
//! colon, ...) fall through to the two keyword-free shapes, connections and
//! markers, before the line is rejected:
//!
//! 1. `title <text>`
//! 2. `terminators <mode>`
//! 3. bare `end`, `if`, `else [if]`, `elif`, `repeat`, each with an optional
//!    `: label`
//! 4. `define`, `begin` and `end` followed by a comma separated agent list
//! 5. `simultaneously [with <marker>]:`
//! 6. `note`, `text` and `state` forms
//! 7. `<agent> <operator> <agent>[: label]`
//! 8. `<name>:`

use std::ops::Range;

use log::{debug, trace};

use chorus_core::{BlockMode, Meta, NoteMode, NotePosition, Terminator};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError, Result},
    lines::{Line, join_tokens},
    parser_types::{
        Arrow, LineOutcome, MetaUpdate, ParseConfig, ParseResult, Participation, RawAgent,
        RawStatement,
    },
    span::Spanned,
};

/// Leading keywords with a dedicated statement form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Title,
    Terminators,
    Block(BlockKeyword),
    Agent(AgentKeyword),
    Simultaneously,
    Note(NoteMode),
}

impl Keyword {
    fn of(word: &str) -> Option<Self> {
        let keyword = match word {
            "title" => Keyword::Title,
            "terminators" => Keyword::Terminators,
            "if" => Keyword::Block(BlockKeyword::If),
            "else" => Keyword::Block(BlockKeyword::Else),
            "elif" => Keyword::Block(BlockKeyword::Elif),
            "repeat" => Keyword::Block(BlockKeyword::Repeat),
            "define" => Keyword::Agent(AgentKeyword::Define),
            "begin" => Keyword::Agent(AgentKeyword::Begin),
            "end" => Keyword::Agent(AgentKeyword::End),
            "simultaneously" => Keyword::Simultaneously,
            "note" => Keyword::Note(NoteMode::Note),
            "text" => Keyword::Note(NoteMode::Text),
            "state" => Keyword::Note(NoteMode::State),
            _ => return None,
        };
        Some(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKeyword {
    If,
    Else,
    Elif,
    Repeat,
}

impl BlockKeyword {
    /// Tokens that may directly follow the keyword before the label.
    fn filler(self) -> &'static [&'static str] {
        match self {
            BlockKeyword::Else => &["if"],
            _ => &[],
        }
    }

    fn statement(self, label: String) -> RawStatement {
        match self {
            BlockKeyword::If => RawStatement::BlockBegin {
                mode: BlockMode::If,
                label,
            },
            BlockKeyword::Repeat => RawStatement::BlockBegin {
                mode: BlockMode::Repeat,
                label,
            },
            BlockKeyword::Else | BlockKeyword::Elif => RawStatement::BlockSplit {
                mode: BlockMode::Else,
                label,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgentKeyword {
    Define,
    Begin,
    End,
}

/// One allowed `<mode> <kind>` note form and its participant limits.
#[derive(Debug, Clone, Copy)]
struct NoteForm {
    position: NotePosition,
    filler: &'static [&'static str],
    min: usize,
    max: Option<usize>,
}

impl NoteForm {
    const fn new(position: NotePosition, filler: &'static [&'static str], min: usize) -> Self {
        Self {
            position,
            filler,
            min,
            max: None,
        }
    }

    fn lookup(mode: NoteMode, kind: &str) -> Option<Self> {
        use NotePosition::*;

        let form = match (mode, kind) {
            (NoteMode::Text, "left") => Self::new(Left, &["of"], 0),
            (NoteMode::Text, "right") => Self::new(Right, &["of"], 0),
            (NoteMode::Note, "over") => Self::new(Over, &[], 0),
            (NoteMode::Note, "left") => Self::new(Left, &["of"], 0),
            (NoteMode::Note, "right") => Self::new(Right, &["of"], 0),
            (NoteMode::Note, "between") => Self::new(Between, &[], 2),
            (NoteMode::State, "over") => Self {
                max: Some(1),
                ..Self::new(Over, &[], 1)
            },
            _ => return None,
        };
        Some(form)
    }

    fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    fn describe_count(&self) -> String {
        match self.max {
            Some(max) if max == self.min => format!("exactly {}", max),
            Some(max) => format!("between {} and {}", self.min, max),
            None => format!("at least {}", self.min),
        }
    }
}

fn note_mode_name(mode: NoteMode) -> &'static str {
    match mode {
        NoteMode::Note => "note",
        NoteMode::Text => "text",
        NoteMode::State => "state",
    }
}

/// Parse one line, applying any metadata change to `meta`.
///
/// # Errors
///
/// Returns a diagnostic when the line matches no statement form
/// ([`ErrorCode::E100`]) or matches a keyword form with invalid contents
/// ([`ErrorCode::E101`], [`ErrorCode::E102`], [`ErrorCode::E103`]).
pub fn parse_line(line: &Line, meta: &mut Meta) -> Result<LineOutcome> {
    let Some(first) = line.get(0) else {
        return Err(unrecognised(line));
    };

    let keyword_outcome = if line.len() == 1 && first.is("end") {
        Some(LineOutcome::Statement(RawStatement::BlockEnd))
    } else {
        match Keyword::of(&first.value) {
            Some(Keyword::Title) => Some(LineOutcome::Meta(MetaUpdate::Title(
                line.join(1..line.len()),
            ))),
            Some(Keyword::Terminators) => Some(terminators(line)?),
            Some(Keyword::Block(keyword)) => Some(block(line, keyword)?),
            Some(Keyword::Agent(keyword)) => agent_manipulation(line, keyword),
            Some(Keyword::Simultaneously) => async_jump(line),
            Some(Keyword::Note(mode)) => note(line, mode)?,
            None => None,
        }
    };

    let outcome = keyword_outcome
        .or_else(|| connection(line))
        .or_else(|| marker(line))
        .ok_or_else(|| unrecognised(line))?;

    if let LineOutcome::Meta(update) = &outcome {
        update.apply(meta);
    }
    Ok(outcome)
}

/// Parse every line of a document into its metadata and statements.
///
/// Statements keep the span of the line they came from. Parsing stops at the
/// first invalid line.
pub fn parse_lines(
    lines: &[Line],
    config: &ParseConfig,
) -> std::result::Result<ParseResult, ParseError> {
    let mut meta = config.initial_meta();
    let mut statements = Vec::new();

    for line in lines {
        match parse_line(line, &mut meta)? {
            LineOutcome::Meta(update) => {
                trace!(update:?; "Updated metadata");
            }
            LineOutcome::Statement(statement) => {
                trace!(kind = statement.kind(); "Parsed statement");
                statements.push(Spanned::new(statement, line.span()));
            }
        }
    }

    debug!(statements = statements.len(); "Parsed lines");
    Ok(ParseResult { meta, statements })
}

fn terminators(line: &Line) -> Result<LineOutcome> {
    let Some(mode) = line.get(1) else {
        return Err(Diagnostic::error(format!("missing terminator mode: {}", line.text()))
            .with_code(ErrorCode::E102)
            .with_label(line.span(), "expected a terminator mode")
            .with_help(terminator_help()));
    };

    let terminators = mode.value.parse::<Terminator>().map_err(|err| {
        Diagnostic::error(format!("{}: {}", err, line.text()))
            .with_code(ErrorCode::E102)
            .with_label(mode.span, "unknown terminator mode")
            .with_help(terminator_help())
    })?;

    Ok(LineOutcome::Meta(MetaUpdate::Terminators(terminators)))
}

fn terminator_help() -> String {
    let names: Vec<&str> = Terminator::ALL.iter().map(Terminator::as_str).collect();
    format!("valid modes are {}", names.join(", "))
}

fn block(line: &Line, keyword: BlockKeyword) -> Result<LineOutcome> {
    let mut index = 1;

    let filler = keyword.filler();
    if !filler.is_empty() && line.len() > index {
        if has_filler(line, index, filler) {
            index += filler.len();
        } else if !line.is_at(index, ":") {
            let span = line.get(index).map_or_else(|| line.span(), |token| token.span);
            return Err(
                Diagnostic::error(format!("invalid block command: {}", line.text()))
                    .with_code(ErrorCode::E101)
                    .with_label(span, "unexpected token")
                    .with_secondary_label(line.span(), "in this block command")
                    .with_help("put the label after a colon"),
            );
        }
    }

    if line.is_at(index, ":") {
        index += 1;
    }

    let label = line.join(index..line.len());
    Ok(LineOutcome::Statement(keyword.statement(label)))
}

fn agent_manipulation(line: &Line, keyword: AgentKeyword) -> Option<LineOutcome> {
    if line.len() <= 1 {
        return None;
    }

    let agents = agent_list(line, 1..line.len());
    let statement = match keyword {
        AgentKeyword::Define => RawStatement::AgentDefine { agents },
        AgentKeyword::Begin => RawStatement::AgentBegin {
            agents,
            mode: Terminator::Box,
        },
        AgentKeyword::End => RawStatement::AgentEnd {
            agents,
            mode: Terminator::Cross,
        },
    };
    Some(LineOutcome::Statement(statement))
}

fn async_jump(line: &Line) -> Option<LineOutcome> {
    if !line.is_at(line.len() - 1, ":") {
        return None;
    }

    let target = if line.len() > 2 {
        if !line.is_at(1, "with") {
            return None;
        }
        line.join(2..line.len() - 1)
    } else {
        String::new()
    };

    Some(LineOutcome::Statement(RawStatement::Async { target }))
}

fn note(line: &Line, mode: NoteMode) -> Result<Option<LineOutcome>> {
    let Some(label_split) = line.find(":", 0) else {
        return Ok(None);
    };
    let Some(form) = line
        .get(1)
        .and_then(|kind| NoteForm::lookup(mode, &kind.value))
    else {
        return Ok(None);
    };

    let mut start = 2;
    if has_filler(line, start, form.filler) {
        start += form.filler.len();
    }

    let agents = agent_list(line, start..label_split);
    if !form.accepts(agents.len()) {
        let name = note_mode_name(mode);
        return Err(Diagnostic::error(format!("invalid {}: {}", name, line.text()))
            .with_code(ErrorCode::E103)
            .with_label(line.span(), format!("{} agents given", agents.len()))
            .with_help(format!(
                "this form of `{}` takes {} agents",
                name,
                form.describe_count()
            )));
    }

    Ok(Some(LineOutcome::Statement(RawStatement::Note {
        position: form.position,
        mode,
        agents,
        label: line.join(label_split + 1..line.len()),
    })))
}

fn connection(line: &Line) -> Option<LineOutcome> {
    let label_split = line.find(":", 0).unwrap_or(line.len());
    let (type_split, arrow) = line
        .tokens()
        .iter()
        .enumerate()
        .find_map(|(index, token)| Arrow::from_operator(&token.value).map(|arrow| (index, arrow)))?;

    // Both sides need at least one token before the label.
    if type_split == 0 || type_split + 1 >= label_split {
        return None;
    }

    let from = read_agent(line, 0..type_split)?;
    let to = read_agent(line, type_split + 1..label_split)?;

    Some(LineOutcome::Statement(RawStatement::Connection {
        agents: [from, to],
        arrow,
        label: line.join(label_split + 1..line.len()),
    }))
}

fn marker(line: &Line) -> Option<LineOutcome> {
    if line.len() < 2 || !line.is_at(line.len() - 1, ":") {
        return None;
    }
    Some(LineOutcome::Statement(RawStatement::Mark {
        name: line.join(0..line.len() - 1),
    }))
}

/// Returns `true` if `filler` appears in full starting at `start`.
fn has_filler(line: &Line, start: usize, filler: &[&str]) -> bool {
    filler
        .iter()
        .enumerate()
        .all(|(offset, word)| line.is_at(start + offset, word))
}

/// Read one connection endpoint, with an optional `+`/`-` prefix.
///
/// A prefix with no name after it is not an endpoint.
fn read_agent(line: &Line, range: Range<usize>) -> Option<RawAgent> {
    let prefix = line
        .get(range.start)
        .and_then(|token| Participation::from_prefix(&token.value));

    match prefix {
        Some(participation) => {
            let name = line.join(range.start + 1..range.end);
            if name.is_empty() {
                return None;
            }
            Some(RawAgent::named(name).with_participation(participation))
        }
        None => Some(RawAgent::named(line.join(range))),
    }
}

/// Split a comma separated run of tokens into agent names.
///
/// Each name keeps the spacing between its tokens; empty entries are
/// skipped.
fn agent_list(line: &Line, range: Range<usize>) -> Vec<RawAgent> {
    line.tokens()
        .get(range)
        .unwrap_or_default()
        .split(|token| token.is(","))
        .map(join_tokens)
        .filter(|name| !name.is_empty())
        .map(RawAgent::named)
        .collect()
}

fn unrecognised(line: &Line) -> Diagnostic {
    Diagnostic::error(format!("unrecognised command: {}", line.text()))
        .with_code(ErrorCode::E100)
        .with_label(line.span(), "no statement matches this line")
        .with_help("connections need an operator such as `->`; markers end with `:`")
}

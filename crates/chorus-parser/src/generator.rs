//! Normalization of raw statements into a [`Sequence`].
//!
//! The generator makes one pass over the flat statement list and builds the
//! final stage tree directly:
//!
//! - Agents are registered on first use, just inside the right sentinel;
//!   `define` registers them early without drawing anything.
//! - Any hidden agent a statement needs is shown first with a synthesized
//!   `agent-begin` (mode `box`). Explicit `begin`/`end` only touch agents
//!   whose visibility actually changes.
//! - A begin or end directly after another of the same mode is merged into it.
//! - Blocks are tracked on a stack. When a block closes its sections become
//!   one [`Block`] stage and its two boundary agents are placed around every
//!   agent used inside it. Blocks with nothing visible inside are dropped.
//! - At the end of the input every agent still visible is closed with the
//!   document's terminator mode.
//!
//! Visibility is global: a section sees whatever the previous section left
//! shown, and only the final flush closes agents.

mod agents;

use indexmap::IndexSet;
use log::{debug, info, trace};

use chorus_core::{
    Block, BlockMode, Connection, Meta, Note, NoteMode, NotePosition, Section, Sequence, Stage,
    Terminator,
    agent::{LEFT_SENTINEL, RIGHT_SENTINEL, block_boundary_names, is_sentinel},
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError, Result},
    parser_types::{Arrow, ParseResult, Participation, RawAgent, RawStatement},
    span::{Span, Spanned},
};

use agents::{AgentId, AgentTable};

/// Normalize a parsed document into a [`Sequence`].
///
/// # Errors
///
/// Fails on the first structural problem: an `async` jump to an undefined
/// marker ([`ErrorCode::E200`]), `begin`/`end`/`define` on a sentinel
/// ([`ErrorCode::E201`]), an `end` with no open block ([`ErrorCode::E202`]),
/// a block still open at the end of input ([`ErrorCode::E203`]) or a split
/// outside a splittable block ([`ErrorCode::E204`]).
pub fn generate(result: &ParseResult) -> std::result::Result<Sequence, ParseError> {
    let sequence = Generator::new(result.meta.clone()).build(&result.statements)?;
    Ok(sequence)
}

/// Where the statement being processed came from.
#[derive(Debug, Clone, Copy)]
struct Origin {
    index: usize,
    span: Span,
}

impl Origin {
    /// One-based statement number, as shown in messages.
    fn number(&self) -> usize {
        self.index + 1
    }
}

/// Stages and bookkeeping for the section currently being filled.
#[derive(Debug, Default)]
struct Nest {
    stages: Vec<Stage>,
    /// Agents drawn inside this nest, including nested block boundaries.
    used: IndexSet<AgentId>,
    /// Set once the nest holds anything a renderer would draw.
    live: bool,
}

#[derive(Debug)]
struct OpenBlock {
    index: usize,
    mode: BlockMode,
    origin: Origin,
    sections: Vec<Section>,
    section_mode: BlockMode,
    section_label: String,
    nest: Nest,
}

struct Generator {
    meta: Meta,
    agents: AgentTable,
    markers: IndexSet<String>,
    root: Nest,
    open: Vec<OpenBlock>,
    block_count: usize,
}

impl Generator {
    fn new(meta: Meta) -> Self {
        Self {
            meta,
            agents: AgentTable::new(),
            markers: IndexSet::new(),
            root: Nest::default(),
            open: Vec::new(),
            block_count: 0,
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    fn build(mut self, statements: &[Spanned<RawStatement>]) -> Result<Sequence> {
        info!(statements = statements.len(); "Generating sequence");

        for (index, statement) in statements.iter().enumerate() {
            trace!(statement = index, kind = statement.kind(); "Processing statement");
            let origin = Origin {
                index,
                span: statement.span(),
            };
            self.statement(statement.inner(), origin)?;
        }

        self.finish()
    }

    fn statement(&mut self, statement: &RawStatement, origin: Origin) -> Result<()> {
        match statement {
            RawStatement::BlockBegin { mode, label } => self.begin_block(*mode, label, origin),
            RawStatement::BlockSplit { mode, label } => self.split_block(*mode, label, origin)?,
            RawStatement::BlockEnd => self.end_block(origin)?,
            RawStatement::AgentDefine { agents } => {
                self.explicit_agents(agents, "define", origin)?;
            }
            RawStatement::AgentBegin { agents, mode } => {
                let ids = self.explicit_agents(agents, "begin", origin)?;
                self.show(&ids, *mode);
            }
            RawStatement::AgentEnd { agents, mode } => {
                let ids = self.explicit_agents(agents, "end", origin)?;
                self.hide(&ids, *mode);
            }
            RawStatement::Connection {
                agents,
                arrow,
                label,
            } => self.connection(agents, *arrow, label),
            RawStatement::Note {
                position,
                mode,
                agents,
                label,
            } => self.note(*position, *mode, agents, label),
            RawStatement::Mark { name } => {
                self.markers.insert(name.clone());
                self.push(Stage::Mark { name: name.clone() });
            }
            RawStatement::Async { target } => {
                if !target.is_empty() && !self.markers.contains(target) {
                    return Err(undefined_marker(target, origin));
                }
                self.push(Stage::Async {
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Sequence> {
        if let Some(block) = self.open.last() {
            return Err(Diagnostic::error(format!(
                "unterminated {} block (statement {})",
                block_mode_name(block.mode),
                block.origin.number()
            ))
            .with_code(ErrorCode::E203)
            .with_label(block.origin.span, "block opened here")
            .with_help("close the block with a line containing only `end`"));
        }

        let visible = self.agents.visible_in_order();
        let terminators = self.meta.terminators;
        self.hide(&visible, terminators);

        let sequence = Sequence {
            meta: self.meta,
            agents: self.agents.into_names(),
            stages: self.root.stages,
        };
        debug!(
            agents = sequence.agents.len(),
            stages = sequence.stages.len();
            "Generated sequence"
        );
        Ok(sequence)
    }

    // ============================================================================
    // Statement Handlers
    // ============================================================================

    /// Register agents named by `begin`, `end` or `define`.
    fn explicit_agents(
        &mut self,
        agents: &[RawAgent],
        action: &str,
        origin: Origin,
    ) -> Result<Vec<AgentId>> {
        let mut ids = Vec::with_capacity(agents.len());
        for agent in agents {
            if is_sentinel(&agent.name) {
                return Err(Diagnostic::error(format!(
                    "cannot {} reserved agent `{}` (statement {})",
                    action,
                    agent.name,
                    origin.number()
                ))
                .with_code(ErrorCode::E201)
                .with_label(origin.span, "reserved agent used here")
                .with_help(format!(
                    "`{}` and `{}` always exist and cannot be changed",
                    LEFT_SENTINEL, RIGHT_SENTINEL
                )));
            }
            ids.push(self.agents.intern(&agent.name));
        }
        Ok(ids)
    }

    fn connection(&mut self, agents: &[RawAgent; 2], arrow: Arrow, label: &str) {
        let ids = [
            self.agents.intern(&agents[0].name),
            self.agents.intern(&agents[1].name),
        ];

        self.show(&ids, Terminator::Box);
        self.mark_used(&ids);
        self.push(Stage::Connection(Connection {
            agents: [agents[0].name.clone(), agents[1].name.clone()],
            line: arrow.line,
            left: arrow.left,
            right: arrow.right,
            label: label.to_string(),
        }));

        let leaving: Vec<AgentId> = ids
            .iter()
            .zip(agents)
            .filter(|(_, agent)| agent.participation == Participation::Hide)
            .map(|(&id, _)| id)
            .collect();
        self.hide(&leaving, Terminator::Cross);
    }

    fn note(&mut self, position: NotePosition, mode: NoteMode, agents: &[RawAgent], label: &str) {
        let names: Vec<String> = if agents.is_empty() {
            default_note_agents(position)
        } else {
            agents.iter().map(|agent| agent.name.clone()).collect()
        };
        let ids: Vec<AgentId> = names.iter().map(|name| self.agents.intern(name)).collect();

        self.show(&ids, Terminator::Box);
        self.mark_used(&ids);
        self.push(Stage::note(
            position,
            Note {
                agents: names,
                mode,
                label: label.to_string(),
            },
        ));
    }

    // ============================================================================
    // Blocks
    // ============================================================================

    fn begin_block(&mut self, mode: BlockMode, label: &str, origin: Origin) {
        let index = self.block_count;
        self.block_count += 1;
        debug!(block = index, mode = block_mode_name(mode); "Opening block");

        self.open.push(OpenBlock {
            index,
            mode,
            origin,
            sections: Vec::new(),
            section_mode: mode,
            section_label: label.to_string(),
            nest: Nest::default(),
        });
    }

    fn split_block(&mut self, mode: BlockMode, label: &str, origin: Origin) -> Result<()> {
        let Some(block) = self.open.last_mut() else {
            return Err(invalid_split("no block is open", origin, None));
        };
        if !block.mode.is_splittable() {
            let message = format!("`{}` blocks cannot be split", block_mode_name(block.mode));
            return Err(invalid_split(&message, origin, Some(block.origin.span)));
        }

        let stages = std::mem::take(&mut block.nest.stages);
        block.sections.push(Section {
            mode: block.section_mode,
            label: std::mem::replace(&mut block.section_label, label.to_string()),
            stages,
        });
        block.section_mode = mode;
        Ok(())
    }

    fn end_block(&mut self, origin: Origin) -> Result<()> {
        let Some(block) = self.open.pop() else {
            return Err(Diagnostic::error(format!(
                "`end` without an open block (statement {})",
                origin.number()
            ))
            .with_code(ErrorCode::E202)
            .with_label(origin.span, "nothing to close")
            .with_help("remove this line or open a block with `if` or `repeat`"));
        };

        let OpenBlock {
            index,
            mut sections,
            section_mode,
            section_label,
            nest,
            ..
        } = block;
        sections.push(Section {
            mode: section_mode,
            label: section_label,
            stages: nest.stages,
        });

        if !nest.live {
            debug!(block = index; "Dropping block with no visible content");
            return Ok(());
        }

        let (left_name, right_name) = block_boundary_names(index);
        let left = self.agents.add_boundary(left_name.clone());
        let right = self.agents.add_boundary(right_name.clone());
        self.place_boundaries(left, right, &nest.used);
        debug!(block = index, sections = sections.len(); "Closed block");

        let parent = self.current_mut();
        parent.used.extend(nest.used);
        parent.used.insert(left);
        parent.used.insert(right);
        parent.live = true;
        parent.stages.push(Stage::Block(Block {
            left: left_name,
            right: right_name,
            sections,
        }));
        Ok(())
    }

    /// Put a block's boundaries just outside the leftmost and rightmost
    /// agents used inside it.
    fn place_boundaries(&mut self, left: AgentId, right: AgentId, used: &IndexSet<AgentId>) {
        let placed: Vec<(usize, AgentId)> = used
            .iter()
            .filter_map(|&id| self.agents.position(id).map(|position| (position, id)))
            .collect();

        match (placed.iter().min(), placed.iter().max()) {
            (Some(&(_, first)), Some(&(_, last))) => {
                self.agents.insert_before(left, first);
                self.agents.insert_after(right, last);
            }
            _ => {
                // Only the sentinels were drawn; span the whole diagram.
                let outer_left = self.agents.left();
                let outer_right = self.agents.right();
                self.agents.insert_after(left, outer_left);
                self.agents.insert_before(right, outer_right);
            }
        }
    }

    // ============================================================================
    // Visibility
    // ============================================================================

    /// Show every hidden agent in `ids`, merging into a directly preceding
    /// begin of the same mode.
    fn show(&mut self, ids: &[AgentId], mode: Terminator) {
        let changed = self.select(ids, false);
        if changed.is_empty() {
            return;
        }
        for &id in &changed {
            self.agents.set_visible(id, true);
        }
        self.mark_used(&changed);

        let names = self.names(&changed);
        trace!(agents:? = names, mode = mode.as_str(); "Showing agents");
        let nest = self.current_mut();
        nest.live = true;
        match nest.stages.last_mut() {
            Some(Stage::AgentBegin {
                agents,
                mode: last_mode,
            }) if *last_mode == mode => merge_names(agents, names),
            _ => nest.stages.push(Stage::AgentBegin {
                agents: names,
                mode,
            }),
        }
    }

    /// Hide every visible agent in `ids`, merging into a directly preceding
    /// end of the same mode.
    fn hide(&mut self, ids: &[AgentId], mode: Terminator) {
        let changed = self.select(ids, true);
        if changed.is_empty() {
            return;
        }
        for &id in &changed {
            self.agents.set_visible(id, false);
        }
        self.mark_used(&changed);

        let names = self.names(&changed);
        trace!(agents:? = names, mode = mode.as_str(); "Hiding agents");
        let nest = self.current_mut();
        nest.live = true;
        match nest.stages.last_mut() {
            Some(Stage::AgentEnd {
                agents,
                mode: last_mode,
            }) if *last_mode == mode => merge_names(agents, names),
            _ => nest.stages.push(Stage::AgentEnd {
                agents: names,
                mode,
            }),
        }
    }

    /// Non-sentinel agents from `ids` whose visibility is `visible`, without
    /// duplicates.
    fn select(&self, ids: &[AgentId], visible: bool) -> Vec<AgentId> {
        let mut selected: Vec<AgentId> = Vec::new();
        for &id in ids {
            if !self.agents.is_sentinel(id)
                && self.agents.is_visible(id) == visible
                && !selected.contains(&id)
            {
                selected.push(id);
            }
        }
        selected
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn current_mut(&mut self) -> &mut Nest {
        match self.open.last_mut() {
            Some(block) => &mut block.nest,
            None => &mut self.root,
        }
    }

    fn push(&mut self, stage: Stage) {
        let nest = self.current_mut();
        nest.live |= stage.is_visible();
        nest.stages.push(stage);
    }

    fn mark_used(&mut self, ids: &[AgentId]) {
        let drawn: Vec<AgentId> = ids
            .iter()
            .copied()
            .filter(|&id| !self.agents.is_sentinel(id))
            .collect();
        self.current_mut().used.extend(drawn);
    }

    fn names(&self, ids: &[AgentId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.agents.name(id).to_string())
            .collect()
    }
}

/// Agents a note covers when it names none.
fn default_note_agents(position: NotePosition) -> Vec<String> {
    match position {
        NotePosition::Left => vec![LEFT_SENTINEL.to_string()],
        NotePosition::Right => vec![RIGHT_SENTINEL.to_string()],
        NotePosition::Over | NotePosition::Between => {
            vec![LEFT_SENTINEL.to_string(), RIGHT_SENTINEL.to_string()]
        }
    }
}

fn merge_names(into: &mut Vec<String>, names: Vec<String>) {
    for name in names {
        if !into.contains(&name) {
            into.push(name);
        }
    }
}

fn block_mode_name(mode: BlockMode) -> &'static str {
    match mode {
        BlockMode::If => "if",
        BlockMode::Else => "else",
        BlockMode::Repeat => "repeat",
    }
}

fn undefined_marker(target: &str, origin: Origin) -> Diagnostic {
    Diagnostic::error(format!(
        "undefined marker `{}` (statement {})",
        target,
        origin.number()
    ))
    .with_code(ErrorCode::E200)
    .with_label(origin.span, "marker is not defined before this point")
    .with_help(format!("add a `{}:` line before this one", target))
}

fn invalid_split(reason: &str, origin: Origin, block_span: Option<Span>) -> Diagnostic {
    let diagnostic = Diagnostic::error(format!(
        "invalid split: {} (statement {})",
        reason,
        origin.number()
    ))
    .with_code(ErrorCode::E204)
    .with_label(origin.span, "cannot split here");

    match block_span {
        Some(span) => diagnostic.with_secondary_label(span, "block opened here"),
        None => diagnostic.with_help("`else` and `elif` must appear inside an `if` block"),
    }
}

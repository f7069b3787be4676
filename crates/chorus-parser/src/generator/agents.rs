//! Arena of agents and their display order.
//!
//! Every agent the generator knows about lives in one table and is referred
//! to by [`AgentId`]. The display order is a separate list of ids, so block
//! boundaries can be placed relative to other agents after the fact.

use indexmap::IndexMap;

use chorus_core::agent::{LEFT_SENTINEL, RIGHT_SENTINEL};

/// Index of an agent in an [`AgentTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct AgentId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgentKind {
    /// One of the two reserved outer agents.
    Sentinel,
    /// Declared by a statement.
    User,
    /// Left or right edge of a block.
    Boundary,
}

#[derive(Debug)]
struct AgentEntry {
    name: String,
    kind: AgentKind,
    visible: bool,
}

#[derive(Debug)]
pub(crate) struct AgentTable {
    entries: Vec<AgentEntry>,
    /// Sentinel and user agents by name. Boundaries are never looked up.
    by_name: IndexMap<String, AgentId>,
    order: Vec<AgentId>,
}

impl AgentTable {
    /// Create a table holding only the two sentinels.
    pub fn new() -> Self {
        let mut table = Self {
            entries: Vec::new(),
            by_name: IndexMap::new(),
            order: Vec::new(),
        };
        for name in [LEFT_SENTINEL, RIGHT_SENTINEL] {
            let id = table.push(name.to_string(), AgentKind::Sentinel);
            table.by_name.insert(name.to_string(), id);
            table.order.push(id);
        }
        table
    }

    fn push(&mut self, name: String, kind: AgentKind) -> AgentId {
        let id = AgentId(self.entries.len());
        self.entries.push(AgentEntry {
            name,
            kind,
            visible: false,
        });
        id
    }

    fn entry(&self, id: AgentId) -> &AgentEntry {
        &self.entries[id.0]
    }

    /// Look up an agent, registering it just inside the right sentinel if it
    /// is new.
    pub fn intern(&mut self, name: &str) -> AgentId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = self.push(name.to_string(), AgentKind::User);
        self.by_name.insert(name.to_string(), id);
        let end = self.order.len() - 1;
        self.order.insert(end, id);
        id
    }

    pub fn name(&self, id: AgentId) -> &str {
        &self.entry(id).name
    }

    pub fn is_sentinel(&self, id: AgentId) -> bool {
        self.entry(id).kind == AgentKind::Sentinel
    }

    pub fn is_visible(&self, id: AgentId) -> bool {
        self.entry(id).visible
    }

    pub fn set_visible(&mut self, id: AgentId, visible: bool) {
        self.entries[id.0].visible = visible;
    }

    /// Create a block boundary agent. It has no place in the display order
    /// until it is inserted.
    pub fn add_boundary(&mut self, name: String) -> AgentId {
        self.push(name, AgentKind::Boundary)
    }

    /// Position of `id` in the display order.
    pub fn position(&self, id: AgentId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Insert `id` directly before `anchor`.
    pub fn insert_before(&mut self, id: AgentId, anchor: AgentId) {
        let index = self.position(anchor).unwrap_or(self.order.len() - 1);
        self.order.insert(index, id);
    }

    /// Insert `id` directly after `anchor`.
    pub fn insert_after(&mut self, id: AgentId, anchor: AgentId) {
        let index = self.position(anchor).map_or(self.order.len() - 1, |index| index + 1);
        self.order.insert(index, id);
    }

    /// The left sentinel.
    pub fn left(&self) -> AgentId {
        self.order[0]
    }

    /// The right sentinel.
    pub fn right(&self) -> AgentId {
        self.order[self.order.len() - 1]
    }

    /// Visible user agents in display order.
    pub fn visible_in_order(&self) -> Vec<AgentId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.entry(id).kind == AgentKind::User && self.is_visible(id))
            .collect()
    }

    /// Agent names in display order.
    pub fn into_names(self) -> Vec<String> {
        let Self {
            mut entries, order, ..
        } = self;
        order
            .into_iter()
            .map(|id| std::mem::take(&mut entries[id.0].name))
            .collect()
    }
}

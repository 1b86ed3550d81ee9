//! Hover-driven neighbor highlighting.

use std::collections::HashSet;

use super::connections::ConnectionGraph;

/// Visual emphasis of an artifact while something is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    /// Nothing is hovered.
    #[default]
    Normal,
    /// The hovered artifact or one of its neighbors.
    Emphasized,
    /// Unrelated to the hovered artifact.
    Dimmed,
}

/// Highlight marks derived from the hovered artifact.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    focus: Option<String>,
    connected: HashSet<String>,
    active: HashSet<usize>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover entered `id`: emphasize it and its neighbors, activate its connections.
    ///
    /// Marks from a previous hover are replaced, not accumulated.
    pub fn enter(&mut self, id: &str, graph: &ConnectionGraph) {
        self.clear();
        self.connected.insert(id.to_string());
        for (index, connection) in graph.touching(id) {
            self.active.insert(index);
            if let Some(other) = connection.other(id) {
                self.connected.insert(other.to_string());
            }
        }
        self.focus = Some(id.to_string());
        tracing::debug!(id, neighbors = self.connected.len() - 1, "Highlighting neighbors");
    }

    /// Hover left. Clears every mark regardless of which artifact was hovered.
    pub fn clear(&mut self) {
        self.focus = None;
        self.connected.clear();
        self.active.clear();
    }

    pub fn is_highlighting(&self) -> bool {
        self.focus.is_some()
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn emphasis(&self, id: &str) -> Emphasis {
        if self.focus.is_none() {
            Emphasis::Normal
        } else if self.connected.contains(id) {
            Emphasis::Emphasized
        } else {
            Emphasis::Dimmed
        }
    }

    /// Whether connection `index` touches the hovered artifact.
    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&index)
    }
}

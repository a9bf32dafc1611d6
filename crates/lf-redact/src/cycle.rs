//! Cycle breaking for shared record nodes.
//!
//! The traversal keeps the path of keys from the root to the current position
//! and the shared nodes it is currently inside. Reaching one of those nodes
//! again is a cycle; the edge is replaced by a marker naming the path to the
//! node it points back at.

use crate::value::SharedValue;

/// Marker for a back-reference to the node at `path` (empty path = root).
///
/// `[Circular ~]` for the root, `[Circular ~.a.0.b]` otherwise.
pub fn circular_marker<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return "[Circular ~]".to_string();
    }
    let joined: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    format!("[Circular ~.{}]", joined.join("."))
}

/// Traversal state: current key path plus the stack of entered shared nodes.
#[derive(Debug, Default)]
pub(crate) struct Ancestors {
    path: Vec<String>,
    entered: Vec<(SharedValue, usize)>,
}

impl Ancestors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn descend(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub(crate) fn ascend(&mut self) {
        self.path.pop();
    }

    /// If `node` is already being visited, the marker that replaces it.
    pub(crate) fn back_reference(&self, node: &SharedValue) -> Option<String> {
        self.entered
            .iter()
            .find(|(entered, _)| entered.ptr_eq(node))
            .map(|(_, depth)| circular_marker(&self.path[..*depth]))
    }

    /// Record that the traversal is now inside `node`.
    pub(crate) fn enter(&mut self, node: &SharedValue) {
        self.entered.push((node.clone(), self.path.len()));
    }

    pub(crate) fn leave(&mut self) {
        self.entered.pop();
    }
}

//! Identity types for signature elements.
//!
//! Two kinds of identity exist side by side:
//! - [`ElementId`] is the logical id assigned when an element is constructed.
//!   It survives [`copy`](crate::structure::SignatureTree::copy), so several
//!   nodes may carry the same id.
//! - [`NodeIdx`] is the arena slot of a node inside one
//!   [`SignatureTree`](crate::structure::SignatureTree). It is never shared and
//!   is what every "find this exact node" search compares.

use std::fmt;

/// Logical identity of a signature element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source scoped to one parse session.
///
/// Ids handed out by one counter are unique; ids of different counters may
/// collide, which is fine because reconciliation only compares paths.
#[derive(Debug, Clone, Default)]
pub struct IdCounter {
    next: u32,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering at `next`, e.g. after a previous session.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Hand out the next id, or `None` once the id space is used up.
    ///
    /// `u32::MAX` itself is never handed out, so a counter never repeats.
    pub fn next_id(&mut self) -> Option<ElementId> {
        let next = self.next.checked_add(1)?;
        let id = ElementId(self.next);
        self.next = next;
        Some(id)
    }

    /// The id the next call to [`next_id`](Self::next_id) hands out, if any.
    pub fn peek(&self) -> ElementId {
        ElementId(self.next)
    }
}

/// Arena slot of a node in a `SignatureTree`.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    /// Create a NodeIdx from an arena index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

//! Comment model.
//!
//! Comments live outside the IR tree in a lookup table keyed by node identity
//! and position. A node has at most one leading and one trailing block. The
//! model stores plain text lines: no `//` or `#` markers, no trimming. Turning
//! a block into target syntax is the emitter's job.

use crate::ir::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a comment block sits relative to the node it documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPosition {
    Leading,
    Trailing,
}

impl fmt::Display for CommentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentPosition::Leading => f.write_str("leading"),
            CommentPosition::Trailing => f.write_str("trailing"),
        }
    }
}

/// A contiguous run of comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBlock {
    lines: Vec<String>,
}

impl CommentBlock {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split `text` on newlines, one comment line per source line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Error raised while building a comment map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentError {
    #[error("node {node} already has a {position} comment")]
    DuplicateAttachment {
        node: NodeId,
        position: CommentPosition,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slots {
    leading: Option<CommentBlock>,
    trailing: Option<CommentBlock>,
}

impl Slots {
    fn slot_mut(&mut self, position: CommentPosition) -> &mut Option<CommentBlock> {
        match position {
            CommentPosition::Leading => &mut self.leading,
            CommentPosition::Trailing => &mut self.trailing,
        }
    }

    fn slot(&self, position: CommentPosition) -> Option<&CommentBlock> {
        match position {
            CommentPosition::Leading => self.leading.as_ref(),
            CommentPosition::Trailing => self.trailing.as_ref(),
        }
    }
}

/// Lookup table from `(node, position)` to the attached comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CommentEntry>", into = "Vec<CommentEntry>")]
pub struct CommentMap {
    slots: BTreeMap<NodeId, Slots>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `block` to `node`. Fails if the slot is already occupied.
    pub fn attach(
        &mut self,
        node: NodeId,
        block: CommentBlock,
        position: CommentPosition,
    ) -> Result<(), CommentError> {
        let slot = self.slots.entry(node).or_default().slot_mut(position);
        if slot.is_some() {
            return Err(CommentError::DuplicateAttachment { node, position });
        }
        *slot = Some(block);
        Ok(())
    }

    pub fn lookup(&self, node: NodeId, position: CommentPosition) -> Option<&CommentBlock> {
        self.slots.get(&node).and_then(|s| s.slot(position))
    }

    /// Total number of comment lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.iter().map(|(_, _, block)| block.len()).sum()
    }

    /// Number of attached blocks.
    pub fn block_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Node ids that carry at least one block, in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.keys().copied()
    }

    /// All blocks ordered by node id, leading before trailing.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, CommentPosition, &CommentBlock)> + '_ {
        self.slots.iter().flat_map(|(node, slots)| {
            [CommentPosition::Leading, CommentPosition::Trailing]
                .into_iter()
                .filter_map(move |pos| slots.slot(pos).map(|block| (*node, pos, block)))
        })
    }
}

/// Serialized form of one attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub node: NodeId,
    pub position: CommentPosition,
    pub lines: Vec<String>,
}

impl TryFrom<Vec<CommentEntry>> for CommentMap {
    type Error = CommentError;

    fn try_from(entries: Vec<CommentEntry>) -> Result<Self, Self::Error> {
        let mut map = CommentMap::new();
        for entry in entries {
            map.attach(entry.node, CommentBlock::new(entry.lines), entry.position)?;
        }
        Ok(map)
    }
}

impl From<CommentMap> for Vec<CommentEntry> {
    fn from(map: CommentMap) -> Self {
        map.iter()
            .map(|(node, position, block)| CommentEntry {
                node,
                position,
                lines: block.lines().to_vec(),
            })
            .collect()
    }
}

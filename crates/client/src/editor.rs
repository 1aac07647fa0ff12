//! Bulk block edits (`PUT /blocks`).
//!
//! Each line of the request body places one block relative to the origin
//! given in the query string:
//!
//! ```text
//! ~0 ~0 ~0 minecraft:stone
//! ~0 ~1 ~0 minecraft:oak_log[axis=y]
//! ```

use std::fmt;

use gdmc_world::{BlockOffset, BlockState};

use crate::error::Result;
use crate::transport::Transport;

pub const BLOCKS_ENDPOINT: &str = "blocks";

/// One block placement, relative to the request origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEdit {
    pub offset: BlockOffset,
    pub state: BlockState,
}

impl BlockEdit {
    pub fn new(offset: BlockOffset, state: BlockState) -> Self {
        Self { offset, state }
    }
}

/// The body line for this edit.
impl fmt::Display for BlockEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "~{} ~{} ~{} {}",
            self.offset.x, self.offset.y, self.offset.z, self.state
        )
    }
}

/// Join edits into a request body: one line each, no trailing newline.
pub fn format_edits(edits: &[BlockEdit]) -> String {
    edits
        .iter()
        .map(BlockEdit::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accumulates structured edits before they are sent.
#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    edits: Vec<BlockEdit>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, offset: BlockOffset, state: BlockState) -> &mut Self {
        self.edits.push(BlockEdit::new(offset, state));
        self
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[BlockEdit] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<BlockEdit> {
        self.edits
    }
}

impl FromIterator<BlockEdit> for EditBatch {
    fn from_iter<I: IntoIterator<Item = BlockEdit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

/// Send structured edits.
///
/// Every state is validated against the block-state grammar first, so the
/// server only ever sees well-formed lines. Returns the server's plain-text
/// summary unchanged.
pub async fn put_blocks(transport: &Transport, edits: &[BlockEdit], origin: BlockOffset) -> Result<String> {
    for edit in edits {
        edit.state.validate()?;
    }
    tracing::debug!("Placing {} blocks at {:?}", edits.len(), origin);
    send(transport, format_edits(edits), origin).await
}

/// Send a pre-formatted body as-is.
///
/// Nothing is checked: malformed lines are only reported through the
/// server's response. Prefer [`put_blocks`].
pub async fn put_raw_blocks(transport: &Transport, body: &str, origin: BlockOffset) -> Result<String> {
    tracing::debug!("Sending {} raw edit lines at {:?}", body.lines().count(), origin);
    send(transport, body.to_string(), origin).await
}

async fn send(transport: &Transport, body: String, origin: BlockOffset) -> Result<String> {
    transport
        .request_text_put(
            BLOCKS_ENDPOINT,
            &[("x", origin.x), ("y", origin.y), ("z", origin.z)],
            body,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone() -> BlockState {
        BlockState::new("minecraft:stone")
    }

    #[test]
    fn line_uses_relative_markers() {
        let edit = BlockEdit::new(
            BlockOffset::new(-1, 2, 0),
            BlockState::new("minecraft:oak_log").with_property("axis", "y"),
        );
        assert_eq!(edit.to_string(), "~-1 ~2 ~0 minecraft:oak_log[axis=y]");
    }

    #[test]
    fn body_has_no_trailing_newline() {
        let mut batch = EditBatch::new();
        batch
            .place(BlockOffset::new(0, 0, 0), stone())
            .place(BlockOffset::new(0, 1, 0), stone());
        assert_eq!(batch.len(), 2);
        assert_eq!(
            format_edits(batch.edits()),
            "~0 ~0 ~0 minecraft:stone\n~0 ~1 ~0 minecraft:stone"
        );
    }

    #[test]
    fn empty_batch_formats_to_empty_body() {
        let batch = EditBatch::new();
        assert!(batch.is_empty());
        assert_eq!(format_edits(batch.edits()), "");
    }

    #[test]
    fn batch_collects_from_iterator() {
        let batch: EditBatch = (0..3)
            .map(|y| BlockEdit::new(BlockOffset::new(0, y, 0), stone()))
            .collect();
        assert_eq!(batch.into_edits().last().map(|e| e.offset.y), Some(2));
    }
}

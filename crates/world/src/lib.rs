//! Game-agnostic value types for talking to a world-editing server:
//! horizontal coordinates, block offsets and block states.
//!
//! Nothing here does I/O. The protocol client lives in `gdmc-client`.

pub mod block;
pub mod position;

pub use block::{BlockState, ParseError};
pub use position::{BlockOffset, CHUNK_SIZE, Vector2Int};

//! Client for the GDMC HTTP world-editing interface.
//!
//! Three operations against one server:
//!
//! - `GET /chunks`: terrain as an NBT document ([`terrain`], [`nbt`])
//! - `GET /buildarea`: the configured build area ([`build_area`])
//! - `PUT /blocks`: bulk block placement ([`editor`])
//!
//! All of them go through a single [`Transport`], which is cheap to clone and
//! safe to share between tasks.

pub mod build_area;
pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod nbt;
pub mod terrain;
pub mod transport;

pub use build_area::BuildAreaExtents;
pub use client::GdmcClient;
pub use config::ClientConfig;
pub use editor::{BlockEdit, EditBatch};
pub use error::{Error, Result};
pub use nbt::{TerrainCodec, TerrainDocument};
pub use terrain::{RawRetention, TerrainRetriever};
pub use transport::Transport;

pub use gdmc_world::{BlockOffset, BlockState, Vector2Int};

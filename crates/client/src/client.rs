//! One handle for all three operations.

use gdmc_world::{BlockOffset, Vector2Int};

use crate::build_area::{self, BuildAreaExtents};
use crate::config::ClientConfig;
use crate::editor::{self, BlockEdit};
use crate::error::Result;
use crate::nbt::TerrainDocument;
use crate::terrain::{RawRetention, TerrainRetriever};
use crate::transport::Transport;

/// Client for one world-editing server.
///
/// The transport inside is shared by every operation. Clone
/// [`GdmcClient::transport`] to issue requests from other tasks; the terrain
/// retriever (and its retained bytes) stays with this handle.
pub struct GdmcClient {
    transport: Transport,
    terrain: TerrainRetriever,
}

impl GdmcClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = Transport::new(config)?;
        let retention = if config.retain_raw {
            RawRetention::Retain
        } else {
            RawRetention::Discard
        };
        tracing::debug!("Client bound to {}", transport.base_url());
        Ok(Self {
            terrain: TerrainRetriever::new(transport.clone(), retention),
            transport,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn terrain(&self) -> &TerrainRetriever {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut TerrainRetriever {
        &mut self.terrain
    }

    /// See [`TerrainRetriever::get_terrain`].
    pub async fn get_terrain(&mut self, origin: Vector2Int, dx: i32, dz: i32) -> Result<TerrainDocument> {
        self.terrain.get_terrain(origin, dx, dz).await
    }

    /// See [`build_area::get_build_area`].
    pub async fn get_build_area(&self) -> Result<BuildAreaExtents> {
        build_area::get_build_area(&self.transport).await
    }

    /// See [`editor::put_blocks`].
    pub async fn put_blocks(&self, edits: &[BlockEdit], origin: BlockOffset) -> Result<String> {
        editor::put_blocks(&self.transport, edits, origin).await
    }

    /// See [`editor::put_raw_blocks`].
    pub async fn put_raw_blocks(&self, body: &str, origin: BlockOffset) -> Result<String> {
        editor::put_raw_blocks(&self.transport, body, origin).await
    }
}

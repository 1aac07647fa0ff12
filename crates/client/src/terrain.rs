//! Terrain retrieval from the `/chunks` endpoint.

use gdmc_world::Vector2Int;

use crate::error::{Error, Result};
use crate::nbt::{NbtCodec, TerrainCodec, TerrainDocument};
use crate::transport::Transport;

pub const CHUNKS_ENDPOINT: &str = "chunks";

/// Whether the retriever keeps the undecoded bytes of its last fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawRetention {
    #[default]
    Discard,
    /// Keep the last response so a caller can restore the area later.
    Retain,
}

/// Clamp a chunk count to the non-negative range. Negative counts become 0.
pub const fn clamp_count(count: i32) -> i32 {
    if count < 0 { 0 } else { count }
}

/// Fetches rectangles of chunks and decodes them with a [`TerrainCodec`].
pub struct TerrainRetriever<C: TerrainCodec = NbtCodec> {
    transport: Transport,
    codec: C,
    retention: RawRetention,
    retained: Option<Vec<u8>>,
}

impl TerrainRetriever<NbtCodec> {
    pub fn new(transport: Transport, retention: RawRetention) -> Self {
        Self::with_codec(transport, NbtCodec, retention)
    }

    /// Decode the retained bytes again, e.g. to compare against a later fetch.
    pub fn retained_document(&self) -> Option<Result<TerrainDocument>> {
        self.retained.as_deref().map(TerrainDocument::decode)
    }
}

impl<C: TerrainCodec> TerrainRetriever<C> {
    pub fn with_codec(transport: Transport, codec: C, retention: RawRetention) -> Self {
        Self {
            transport,
            codec,
            retention,
            retained: None,
        }
    }

    /// Fetch `dx` × `dz` chunks starting at the chunk that contains `origin`.
    ///
    /// `origin` is a world position; it is divided by 16 (truncating) to get
    /// chunk coordinates. Negative counts are clamped to 0. The response is
    /// sniffed before decoding and rejected with [`Error::Format`] if it is
    /// not a terrain document, in which case the decoder is never run.
    pub async fn get_terrain(&mut self, origin: Vector2Int, dx: i32, dz: i32) -> Result<C::Document> {
        let chunk = origin.to_chunk();
        let (dx, dz) = (clamp_count(dx), clamp_count(dz));
        tracing::debug!("Fetching {}x{} chunks at chunk {}", dx, dz, chunk);

        let bytes = self
            .transport
            .request_binary(
                CHUNKS_ENDPOINT,
                &[("x", chunk.x), ("z", chunk.z), ("dx", dx), ("dz", dz)],
            )
            .await?;

        if !self.codec.is_document(&bytes) {
            return Err(Error::Format(format!(
                "/{} returned {} bytes that are not a terrain document",
                CHUNKS_ENDPOINT,
                bytes.len()
            )));
        }
        let document = self.codec.decode(&bytes)?;

        if self.retention == RawRetention::Retain {
            self.retained = Some(bytes);
        }
        Ok(document)
    }

    pub fn retention(&self) -> RawRetention {
        self.retention
    }

    /// Raw bytes of the last successful fetch, when retaining.
    pub fn retained_raw(&self) -> Option<&[u8]> {
        self.retained.as_deref()
    }

    pub fn take_retained_raw(&mut self) -> Option<Vec<u8>> {
        self.retained.take()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn clamp_count_floors_at_zero() {
        assert_eq!(clamp_count(-5), 0);
        assert_eq!(clamp_count(i32::MIN), 0);
        assert_eq!(clamp_count(0), 0);
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(i32::MAX), i32::MAX);
    }

    proptest! {
        #[test]
        fn clamp_count_is_never_negative(count in any::<i32>()) {
            let clamped = clamp_count(count);
            prop_assert!(clamped >= 0);
            prop_assert_eq!(clamped, if count < 0 { 0 } else { count });
        }
    }
}

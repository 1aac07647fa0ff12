//! Terrain documents: NBT as sent by the `/chunks` endpoint.
//!
//! The payload may arrive raw, gzip-wrapped or zlib-wrapped. In every case it
//! must unwrap to a single named `TAG_Compound` root.

use std::io::Read;

use fastnbt::Value;
use flate2::read::{GzDecoder, ZlibDecoder};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// NBT tag id of a compound, the only valid document root.
const TAG_COMPOUND: u8 = 10;

/// Decoder for whatever the terrain endpoint returns.
///
/// `is_document` is a cheap format sniff; `decode` is only ever called on
/// bytes that passed it.
pub trait TerrainCodec {
    type Document;

    fn is_document(&self, bytes: &[u8]) -> bool;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Document>;
}

/// The NBT codec used against real servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NbtCodec;

impl TerrainCodec for NbtCodec {
    type Document = TerrainDocument;

    fn is_document(&self, bytes: &[u8]) -> bool {
        is_nbt_document(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<TerrainDocument> {
        TerrainDocument::decode(bytes)
    }
}

// ── Compression sniffing ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Guess the wrapper from the leading bytes.
    pub fn detect(bytes: &[u8]) -> Option<Compression> {
        match bytes {
            [0x1f, 0x8b, ..] => Some(Compression::Gzip),
            // Deflate with a 32K window and a valid header checksum.
            [0x78, flg, ..] if (0x78u16 * 256 + *flg as u16) % 31 == 0 => Some(Compression::Zlib),
            [TAG_COMPOUND, ..] => Some(Compression::None),
            _ => None,
        }
    }

    fn reader<'a>(self, bytes: &'a [u8]) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(bytes),
            Compression::Gzip => Box::new(GzDecoder::new(bytes)),
            Compression::Zlib => Box::new(ZlibDecoder::new(bytes)),
        }
    }
}

/// Does `bytes` look like an NBT document?
///
/// Only the root header is inspected: the tag id must be a compound and the
/// root name must be fully present. Compressed input is decompressed just far
/// enough to read that header.
pub fn is_nbt_document(bytes: &[u8]) -> bool {
    let Some(compression) = Compression::detect(bytes) else {
        return false;
    };
    let mut reader = compression.reader(bytes);

    let mut header = [0u8; 3];
    if reader.read_exact(&mut header).is_err() || header[0] != TAG_COMPOUND {
        return false;
    }
    let name_len = u16::from_be_bytes([header[1], header[2]]) as usize;
    let mut name = vec![0u8; name_len];
    reader.read_exact(&mut name).is_ok()
}

/// Strip any compression wrapper and return the bare NBT payload.
fn unwrap_payload(bytes: &[u8]) -> Result<Vec<u8>> {
    let compression = Compression::detect(bytes)
        .ok_or_else(|| Error::Format("unrecognised terrain payload".into()))?;
    if compression == Compression::None {
        return Ok(bytes.to_vec());
    }
    let mut payload = Vec::new();
    compression
        .reader(bytes)
        .read_to_end(&mut payload)
        .map_err(|e| Error::Format(format!("decompressing {:?} terrain payload: {}", compression, e)))?;
    Ok(payload)
}

// ── Document ─────────────────────────────────────────────────────────────

/// A decoded terrain document.
///
/// The tree is kept as a generic [`fastnbt::Value`]; callers that know the
/// layout can deserialize the payload into their own types with
/// [`TerrainDocument::deserialize`].
#[derive(Debug, Clone)]
pub struct TerrainDocument {
    root: Value,
    payload: Vec<u8>,
}

impl TerrainDocument {
    /// Decode raw, gzip or zlib wrapped NBT.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let payload = unwrap_payload(bytes)?;
        let root: Value = fastnbt::from_bytes(&payload)
            .map_err(|e| Error::Format(format!("decoding terrain NBT: {}", e)))?;
        Ok(Self { root, payload })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    /// A direct child of the root compound.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.root {
            Value::Compound(map) => map.get(key),
            _ => None,
        }
    }

    /// Names of the root compound's children, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = match &self.root {
            Value::Compound(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        keys.sort_unstable();
        keys
    }

    /// Uncompressed NBT bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Deserialize the document into a caller-defined shape.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        fastnbt::from_bytes(&self.payload)
            .map_err(|e| Error::Format(format!("terrain document layout: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::{GzEncoder, ZlibEncoder};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        #[serde(rename = "xPos")]
        x_pos: i32,
        #[serde(rename = "Status")]
        status: String,
    }

    fn sample_bytes() -> Vec<u8> {
        fastnbt::to_bytes(&Sample {
            x_pos: 3,
            status: "minecraft:full".into(),
        })
        .unwrap()
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    fn zlib(bytes: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn detects_wrappers() {
        let raw = sample_bytes();
        assert_eq!(Compression::detect(&raw), Some(Compression::None));
        assert_eq!(Compression::detect(&gzip(&raw)), Some(Compression::Gzip));
        assert_eq!(Compression::detect(&zlib(&raw)), Some(Compression::Zlib));
        assert_eq!(Compression::detect(b"{\"x\":1}"), None);
        assert_eq!(Compression::detect(&[]), None);
    }

    #[test]
    fn sniff_accepts_all_wrappers() {
        let raw = sample_bytes();
        assert!(is_nbt_document(&raw));
        assert!(is_nbt_document(&gzip(&raw)));
        assert!(is_nbt_document(&zlib(&raw)));
    }

    #[test]
    fn sniff_rejects_truncated_and_foreign_input() {
        assert!(!is_nbt_document(b""));
        assert!(!is_nbt_document(b"<html>not found</html>"));
        // Compound tag claiming a 5-byte name with only 2 bytes present.
        assert!(!is_nbt_document(&[TAG_COMPOUND, 0, 5, b'a', b'b']));
        // Gzip wrapper around something that is not NBT.
        assert!(!is_nbt_document(&gzip(b"plain text")));
    }

    #[test]
    fn decode_exposes_root_children() {
        let doc = TerrainDocument::decode(&gzip(&sample_bytes())).unwrap();
        assert_eq!(doc.keys(), vec!["Status", "xPos"]);
        assert_eq!(doc.get("xPos"), Some(&Value::Int(3)));
        assert_eq!(doc.payload(), sample_bytes().as_slice());
    }

    #[test]
    fn deserialize_into_caller_type() {
        let doc = TerrainDocument::decode(&zlib(&sample_bytes())).unwrap();
        let sample: Sample = doc.deserialize().unwrap();
        assert_eq!(sample.x_pos, 3);
        assert_eq!(sample.status, "minecraft:full");
    }

    #[test]
    fn decode_reports_format_errors() {
        assert!(matches!(TerrainDocument::decode(b"nope"), Err(Error::Format(_))));
        assert!(matches!(
            TerrainDocument::decode(&[TAG_COMPOUND, 0, 0, 99]),
            Err(Error::Format(_))
        ));
    }
}

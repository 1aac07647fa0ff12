//! The server-side build area (`/buildarea`).

use gdmc_world::{BlockOffset, Vector2Int};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transport::Transport;

pub const BUILD_AREA_ENDPOINT: &str = "buildarea";

/// Hint shown to users when no build area has been configured.
pub const NOT_CONFIGURED_HINT: &str =
    "no build area is set; run /setbuildarea in-game first";

/// Corners of the build area as the server reports them.
///
/// The server does not promise `from <= to` on each axis and neither does
/// decoding; use [`BuildAreaExtents::is_ordered`] or
/// [`BuildAreaExtents::normalized`] when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAreaExtents {
    pub x_from: i32,
    pub y_from: i32,
    pub z_from: i32,
    pub x_to: i32,
    pub y_to: i32,
    pub z_to: i32,
}

impl BuildAreaExtents {
    pub const fn new(from: BlockOffset, to: BlockOffset) -> Self {
        Self {
            x_from: from.x,
            y_from: from.y,
            z_from: from.z,
            x_to: to.x,
            y_to: to.y,
            z_to: to.z,
        }
    }

    /// Parse the JSON body of a `/buildarea` response.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Format(format!("build area json: {}", e)))
    }

    pub const fn from_corner(&self) -> BlockOffset {
        BlockOffset::new(self.x_from, self.y_from, self.z_from)
    }

    pub const fn to_corner(&self) -> BlockOffset {
        BlockOffset::new(self.x_to, self.y_to, self.z_to)
    }

    pub const fn is_ordered(&self) -> bool {
        self.x_from <= self.x_to && self.y_from <= self.y_to && self.z_from <= self.z_to
    }

    /// Same box with `from` holding the minimum on every axis.
    pub fn normalized(&self) -> Self {
        Self {
            x_from: self.x_from.min(self.x_to),
            y_from: self.y_from.min(self.y_to),
            z_from: self.z_from.min(self.z_to),
            x_to: self.x_from.max(self.x_to),
            y_to: self.y_from.max(self.y_to),
            z_to: self.z_from.max(self.z_to),
        }
    }

    /// Lowest corner of the normalized box.
    pub fn origin(&self) -> BlockOffset {
        self.normalized().from_corner()
    }

    /// Block counts per axis, both corners inclusive. Saturates at
    /// `i32::MAX` for boxes wider than an `i32` can count.
    pub fn size(&self) -> BlockOffset {
        let n = self.normalized();
        let span = |from: i32, to: i32| to.saturating_sub(from).saturating_add(1);
        BlockOffset::new(span(n.x_from, n.x_to), span(n.y_from, n.y_to), span(n.z_from, n.z_to))
    }

    /// Horizontal (min, max) corners.
    pub fn horizontal_corners(&self) -> (Vector2Int, Vector2Int) {
        let n = self.normalized();
        (n.from_corner().horizontal(), n.to_corner().horizontal())
    }
}

/// Ask the server for its build area.
///
/// Returns [`Error::NotConfigured`] when the server answers 404, which it does
/// until a build area has been set.
pub async fn get_build_area(transport: &Transport) -> Result<BuildAreaExtents> {
    let json = transport.request_json(BUILD_AREA_ENDPOINT).await?;
    let extents = BuildAreaExtents::from_json(&json)?;
    tracing::debug!("Build area: {:?} -> {:?}", extents.from_corner(), extents.to_corner());
    Ok(extents)
}

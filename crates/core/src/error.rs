use thiserror::Error;

use crate::entity::Element;

/// Rejections raised while building a level or its parameters.
/// Nothing past construction can fail.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level description is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile size must be positive, got {0}")]
    TileSize(f32),

    #[error("{width}x{height} map needs {expected} tiles, got {actual}")]
    TileCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("object `{name}` has a non-positive size {w}x{h}")]
    ObjectSize { name: String, w: f32, h: f32 },

    #[error("no start position for the {0} character")]
    MissingStart(Element),

    #[error("more than one start position for the {0} character")]
    DuplicateStart(Element),

    #[error("start position names element {0}, which no character has")]
    UnplayableStart(Element),

    #[error("invalid parameter `{name}`: {reason}")]
    Param { name: &'static str, reason: String },
}

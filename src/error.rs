//! Error types shared by the import, export and bake operations.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TerrainHelperError>;

/// Everything that can make a terrain helper operation abort.
///
/// No operation retries internally and none of them leaves a partially
/// mutated heightfield behind: validation always runs before the first write.
#[derive(Error, Debug)]
pub enum TerrainHelperError {
    #[error("image must be square (got {width}x{height})")]
    NotSquare { width: u32, height: u32 },

    #[error("resolution out of range: {0} is not a valid heightmap resolution")]
    UnsupportedResolution(u32),

    #[error("capture resolution {width}x{height} is not supported")]
    UnsupportedCaptureResolution { width: u32, height: u32 },

    #[error("alpha map layers must share one resolution (layer {layer} is {rows}x{cols})")]
    MismatchedLayers { layer: usize, rows: usize, cols: usize },

    #[error("no {0} selected")]
    MissingSelection(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Coarse category of a [`TerrainHelperError`], used by a hosting shell to
/// decide how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller must pick a different input or mode.
    InvalidInput,
    /// No source image or target was chosen; the action should not run.
    MissingSelection,
    /// Reading or writing a file failed.
    Io,
}

impl TerrainHelperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TerrainHelperError::NotSquare { .. }
            | TerrainHelperError::UnsupportedResolution(_)
            | TerrainHelperError::UnsupportedCaptureResolution { .. }
            | TerrainHelperError::MismatchedLayers { .. } => ErrorKind::InvalidInput,
            TerrainHelperError::MissingSelection(_) => ErrorKind::MissingSelection,
            TerrainHelperError::Io(_) | TerrainHelperError::Image(_) => ErrorKind::Io,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            TerrainHelperError::NotSquare { width: 40, height: 60 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            TerrainHelperError::MissingSelection("image").kind(),
            ErrorKind::MissingSelection
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(TerrainHelperError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn not_square_message_mentions_square() {
        let err = TerrainHelperError::NotSquare { width: 40, height: 60 };
        assert_eq!(err.to_string(), "image must be square (got 40x60)");
    }
}

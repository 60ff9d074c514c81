use std::path::{Path, PathBuf};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::core::FrameIndex;

/// Outcome of loading one frame of a sequence.
///
/// A failed load is an expected, silent outcome: the player counts it toward
/// progress and skips the frame at draw time. It never carries an error value
/// because nothing downstream is allowed to react to one.
#[derive(Clone, Debug)]
pub enum FrameLoad {
    /// The frame decoded successfully.
    Loaded(PreparedImage),
    /// The frame could not be read or decoded.
    Failed,
}

impl FrameLoad {
    /// `true` for [`FrameLoad::Loaded`].
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// File name for frame `index` under the sequence naming contract.
///
/// Frames are 1-indexed on disk with 4-digit zero padding (`0001.png`,
/// `0002.png`, ...). This exact convention is load-bearing: asset packs are
/// produced against it.
pub fn frame_file_name(index: FrameIndex) -> String {
    format!("{:04}.png", index.0 + 1)
}

/// A directory of sequentially numbered frame images.
#[derive(Clone, Debug)]
pub struct FrameDir {
    root: PathBuf,
}

impl FrameDir {
    /// Wrap a frame directory. The directory is not touched until frames are
    /// loaded.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory frames are loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of frame `index`.
    pub fn frame_path(&self, index: FrameIndex) -> PathBuf {
        self.root.join(frame_file_name(index))
    }

    /// Load and decode one frame.
    ///
    /// Any read or decode failure resolves to [`FrameLoad::Failed`]; the cause
    /// is logged at debug level and otherwise dropped.
    pub fn load_frame(&self, index: FrameIndex) -> FrameLoad {
        let path = self.frame_path(index);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(frame = index.0, path = %path.display(), %err, "frame read failed");
                return FrameLoad::Failed;
            }
        };
        match decode_image(&bytes) {
            Ok(img) => FrameLoad::Loaded(img),
            Err(err) => {
                tracing::debug!(frame = index.0, path = %path.display(), %err, "frame decode failed");
                FrameLoad::Failed
            }
        }
    }
}

//! Frame geometry shared by the decoder and the palette
//! mapper.

use serde_derive::*;

use crate::error::{Error, Result};

/// Dimensions of a raw frame, in pixels.
///
/// The default matches the 640x512 cores this tooling is
/// usually pointed at; any non-zero size is accepted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
}

impl FrameGeometry {
    pub const fn new(width: usize, height: usize) -> Self {
        FrameGeometry { width, height }
    }

    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        FrameGeometry::new(640, 512)
    }
}

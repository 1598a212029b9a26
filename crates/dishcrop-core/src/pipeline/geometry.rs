//! Center-crop geometry.

use serde::{Deserialize, Serialize};

/// Square sub-rectangle of a source image to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge in source pixels
    pub x: u32,
    /// Top edge in source pixels
    pub y: u32,
    /// Side length in source pixels
    pub size: u32,
}

impl CropRegion {
    /// True if the region lies entirely inside a `width × height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.size > 0
            && u64::from(self.x) + u64::from(self.size) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.size) <= u64::from(height)
    }
}

/// Largest square centered on the longer axis of a `width × height` image.
///
/// Margins are split with floor division, so an odd difference leaves the
/// extra pixel on the right or bottom. Returns `None` for a zero side.
pub fn center_crop(width: u32, height: u32) -> Option<CropRegion> {
    if width == 0 || height == 0 {
        return None;
    }

    let size = width.min(height);
    Some(CropRegion {
        x: (width - size) / 2,
        y: (height - size) / 2,
        size,
    })
}

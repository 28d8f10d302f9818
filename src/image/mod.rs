//! BGR image views and resize metadata.
//!
//! `ImageView` is a borrowed, interleaved 3-channel view with an explicit row
//! stride in bytes. A stride larger than `3 * width` represents padded rows.
//! The detector never inspects pixels itself; views are handed to the engine.

use crate::util::{RoiDecodeError, RoiDecodeResult};

mod info;
#[cfg(feature = "image-io")]
pub mod io;

pub use info::ImInfo;

/// Number of interleaved channels (B, G, R).
pub const CHANNELS: usize = 3;

/// Borrowed BGR image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a packed view with `stride == 3 * width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> RoiDecodeResult<Self> {
        let stride = width
            .checked_mul(CHANNELS)
            .ok_or(RoiDecodeError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, stride)
    }

    /// Creates a view with an explicit stride in bytes.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> RoiDecodeResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(RoiDecodeError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the `[b, g, r]` triple at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(CHANNELS)?)?;
        let px = self.data.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }

    /// Returns the packed bytes of row `y` (length `3 * width`).
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * CHANNELS)?;
        self.data.get(start..end)
    }
}

/// Owned packed BGR image.
#[derive(Clone, Debug)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a packed BGR buffer of exactly `3 * width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> RoiDecodeResult<Self> {
        let stride = width
            .checked_mul(CHANNELS)
            .ok_or(RoiDecodeError::InvalidDimensions { width, height })?;
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(RoiDecodeError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(RoiDecodeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * CHANNELS,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the packed pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> RoiDecodeResult<usize> {
    if width == 0 || height == 0 {
        return Err(RoiDecodeError::InvalidDimensions { width, height });
    }
    let row_len = width
        .checked_mul(CHANNELS)
        .ok_or(RoiDecodeError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(RoiDecodeError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(RoiDecodeError::InvalidDimensions { width, height })
}

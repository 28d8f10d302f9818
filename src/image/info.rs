//! Short-side resize metadata handed to the proposal stage.

use crate::util::{RoiDecodeError, RoiDecodeResult};

/// Resize metadata `(resized_height, resized_width, scale)`.
///
/// Proposals come back in the resized coordinate space; dividing by `scale`
/// maps them to original pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImInfo {
    pub resized_height: f32,
    pub resized_width: f32,
    pub scale: f32,
}

impl ImInfo {
    /// Scales the shorter image side to `target_size`, keeping aspect ratio.
    pub fn for_target_size(
        width: usize,
        height: usize,
        target_size: usize,
    ) -> RoiDecodeResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoiDecodeError::InvalidDimensions { width, height });
        }
        if target_size == 0 {
            return Err(RoiDecodeError::InvalidCount {
                name: "target_size",
                value: target_size,
            });
        }

        let target = target_size as f32;
        let (w, h) = (width as f32, height as f32);
        let info = if width < height {
            let scale = target / w;
            Self {
                resized_height: h * scale,
                resized_width: target,
                scale,
            }
        } else {
            let scale = target / h;
            Self {
                resized_height: target,
                resized_width: w * scale,
                scale,
            }
        };
        Ok(info)
    }

    /// Integer `(width, height)` of the resized pixel buffer (truncated).
    pub fn resized_pixels(&self) -> (usize, usize) {
        (self.resized_width as usize, self.resized_height as usize)
    }

    /// The `[h, w, scale]` triple in network input order.
    pub fn to_array(&self) -> [f32; 3] {
        [self.resized_height, self.resized_width, self.scale]
    }
}

#[cfg(test)]
mod tests {
    use super::ImInfo;

    #[test]
    fn landscape_scales_height_to_target() {
        let info = ImInfo::for_target_size(640, 480, 224).unwrap();
        assert_eq!(info.resized_height, 224.0);
        assert!((info.scale - 224.0 / 480.0).abs() < 1e-6);
        assert_eq!(info.resized_pixels(), (298, 224));
    }

    #[test]
    fn portrait_scales_width_to_target() {
        let info = ImInfo::for_target_size(300, 600, 150).unwrap();
        assert_eq!(info.resized_width, 150.0);
        assert_eq!(info.scale, 0.5);
        assert_eq!(info.to_array(), [300.0, 150.0, 0.5]);
    }
}

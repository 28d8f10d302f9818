//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedImage;
use crate::util::{RoiDecodeError, RoiDecodeResult};
use std::path::Path;

/// Converts an RGB buffer into a packed BGR owned image.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> RoiDecodeResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut data = Vec::with_capacity(width * height * 3);
    for px in img.pixels() {
        let [r, g, b] = px.0;
        data.extend_from_slice(&[b, g, r]);
    }
    OwnedImage::new(data, width, height)
}

/// Creates a BGR owned image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> RoiDecodeResult<OwnedImage> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk in BGR channel order.
pub fn load_bgr_image<P: AsRef<Path>>(path: P) -> RoiDecodeResult<OwnedImage> {
    let img = image::open(path).map_err(|err| RoiDecodeError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

//! Error types for roidecode.

use thiserror::Error;

/// Result alias for roidecode operations.
pub type RoiDecodeResult<T> = std::result::Result<T, RoiDecodeError>;

/// Errors that can occur when configuring or running the detector.
///
/// Per-region extraction failures are not represented here: they are
/// recovered locally by skipping the region.
#[derive(Debug, Error, PartialEq)]
pub enum RoiDecodeError {
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the packed row length.
    #[error("invalid stride: row needs {row_len} bytes, stride is {stride}")]
    InvalidStride { row_len: usize, stride: usize },
    /// The pixel buffer is shorter than the declared layout requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// `class_names` does not match the class count of the model.
    #[error("class count mismatch: model has {expected} classes, got {got} names")]
    ClassCountMismatch { expected: usize, got: usize },
    /// A threshold lies outside its valid range.
    #[error("invalid threshold {name}={value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// A count parameter is out of range.
    #[error("invalid count {name}={value}")]
    InvalidCount { name: &'static str, value: usize },
    /// The engine failed at the image level (feature or proposal stage).
    #[error("engine failure: {reason}")]
    Engine { reason: String },
    /// The worker pool could not be created.
    #[error("thread pool error: {reason}")]
    ThreadPool { reason: String },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

//! roidecode turns raw two-stage detector outputs into final detections.
//!
//! Given region proposals and, per region, class probabilities and box
//! regression deltas, the crate picks each region's best class, decodes and
//! clips its box, suppresses overlaps per class with greedy IoU NMS, and
//! returns the highest-scoring detections. The inference runtime itself is
//! abstracted behind [`DetectionEngine`]; region evaluation can run in
//! parallel via the `rayon` feature.

mod candidate;
pub mod decode;
pub mod detector;
pub mod engine;
pub mod geometry;
pub mod image;
pub mod lowlevel;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use decode::{DeltaLayout, Detection};
pub use detector::{Detector, DetectorConfig, VOC_CLASSES};
pub use engine::{
    DetectionEngine, Preprocess, Proposals, RecordedEngine, RecordedEngineError, RegionExtractor,
    RegionOutput,
};
pub use geometry::{Rect, Roi};
pub use crate::image::{ImInfo, ImageView, OwnedImage};
pub use util::{RoiDecodeError, RoiDecodeResult};

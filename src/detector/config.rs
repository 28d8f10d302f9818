//! Detector configuration.

use crate::decode::DeltaLayout;
use crate::util::{RoiDecodeError, RoiDecodeResult};

/// PASCAL VOC class names; index 0 is the background class.
pub const VOC_CLASSES: [&str; 21] = [
    "background",
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// Construction-time detector settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Short-side resize target passed to the proposal stage.
    pub target_size: usize,
    /// Maximum number of detections returned per image.
    pub max_per_image: usize,
    /// Best-class scores at or below this value are discarded. Range `[0, 1)`.
    pub confidence_thresh: f32,
    /// IoU above which a lower-scoring box is suppressed. Range `(0, 1)`.
    pub nms_threshold: f32,
    /// Worker count for the engine and for parallel region evaluation.
    pub num_threads: usize,
    /// Class names, `class_names[0]` is the background class.
    pub class_names: Vec<String>,
    /// Per-channel BGR mean subtracted by the engine.
    pub mean_vals: [f32; 3],
    /// Layout of the regression deltas in each region's output.
    pub delta_layout: DeltaLayout,
    /// Evaluate regions in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_size: 224,
            max_per_image: 100,
            confidence_thresh: 0.6,
            nms_threshold: 0.3,
            num_threads: 1,
            class_names: VOC_CLASSES.iter().map(|name| name.to_string()).collect(),
            mean_vals: [102.9801, 115.9465, 122.7717],
            delta_layout: DeltaLayout::default(),
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Number of classes including background.
    pub fn num_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Checks ranges of every field that does not depend on the engine.
    pub fn validate(&self) -> RoiDecodeResult<()> {
        if !(0.0..1.0).contains(&self.confidence_thresh) {
            return Err(RoiDecodeError::InvalidThreshold {
                name: "confidence_thresh",
                value: self.confidence_thresh,
            });
        }
        if !(self.nms_threshold > 0.0 && self.nms_threshold < 1.0) {
            return Err(RoiDecodeError::InvalidThreshold {
                name: "nms_threshold",
                value: self.nms_threshold,
            });
        }
        if self.target_size == 0 {
            return Err(RoiDecodeError::InvalidCount {
                name: "target_size",
                value: self.target_size,
            });
        }
        if self.num_threads == 0 {
            return Err(RoiDecodeError::InvalidCount {
                name: "num_threads",
                value: self.num_threads,
            });
        }
        if self.class_names.len() < 2 {
            return Err(RoiDecodeError::InvalidCount {
                name: "class_names",
                value: self.class_names.len(),
            });
        }
        Ok(())
    }
}

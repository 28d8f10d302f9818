//! Engine that replays captured network outputs.
//!
//! Useful for decoding dumps produced by a real runtime, and for exercising
//! the pipeline deterministically in tests and benches.

use crate::engine::{DetectionEngine, Preprocess, Proposals, RegionExtractor, RegionOutput};
use crate::geometry::Roi;
use crate::image::ImageView;
use thiserror::Error;

/// One captured region: its proposal and outputs, or `None` when the
/// runtime failed to extract it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRegion {
    pub roi: Roi,
    pub output: Option<RegionOutput>,
}

/// Errors raised by [`RecordedEngine`].
#[derive(Debug, Error, PartialEq)]
pub enum RecordedEngineError {
    /// The image does not match the size the outputs were captured for.
    #[error("image is {got_width}x{got_height}, recording was made for {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    /// The recording has no outputs for this region.
    #[error("no recorded output for region {0}")]
    MissingRegion(usize),
}

/// Replays recorded proposals and per-region outputs.
#[derive(Clone, Debug)]
pub struct RecordedEngine {
    width: usize,
    height: usize,
    num_classes: usize,
    regions: Vec<RecordedRegion>,
}

impl RecordedEngine {
    /// Creates an engine for an image of `width x height` pixels.
    pub fn new(width: usize, height: usize, num_classes: usize) -> Self {
        Self {
            width,
            height,
            num_classes,
            regions: Vec::new(),
        }
    }

    /// Appends a region with recorded outputs.
    pub fn with_region(mut self, roi: Roi, scores: Vec<f32>, deltas: Vec<f32>) -> Self {
        self.regions.push(RecordedRegion {
            roi,
            output: Some(RegionOutput { scores, deltas }),
        });
        self
    }

    /// Appends a region whose extraction fails.
    pub fn with_failed_region(mut self, roi: Roi) -> Self {
        self.regions.push(RecordedRegion { roi, output: None });
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn regions(&self) -> &[RecordedRegion] {
        &self.regions
    }
}

/// Extraction handle borrowing the recording.
pub struct RecordedExtractor<'a> {
    regions: &'a [RecordedRegion],
}

impl RegionExtractor for RecordedExtractor<'_> {
    type Features = ();
    type Error = RecordedEngineError;

    fn evaluate(
        &mut self,
        _features: &(),
        index: usize,
        _roi: &Roi,
    ) -> Result<RegionOutput, Self::Error> {
        self.regions
            .get(index)
            .and_then(|region| region.output.clone())
            .ok_or(RecordedEngineError::MissingRegion(index))
    }
}

impl DetectionEngine for RecordedEngine {
    type Features = ();
    type Error = RecordedEngineError;
    type Extractor<'a> = RecordedExtractor<'a>;

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn propose(
        &self,
        image: ImageView<'_>,
        _preprocess: &Preprocess,
    ) -> Result<Proposals<()>, Self::Error> {
        if image.width() != self.width || image.height() != self.height {
            return Err(RecordedEngineError::SizeMismatch {
                width: self.width,
                height: self.height,
                got_width: image.width(),
                got_height: image.height(),
            });
        }
        Ok(Proposals {
            features: (),
            rois: self.regions.iter().map(|region| region.roi).collect(),
        })
    }

    fn extractor(&self) -> RecordedExtractor<'_> {
        RecordedExtractor {
            regions: &self.regions,
        }
    }
}

//! Contract for the external inference engine.
//!
//! The detector drives an engine in two stages. [`DetectionEngine::propose`]
//! runs once per image and yields the shared feature state plus the region
//! proposals. Each proposal is then evaluated through a [`RegionExtractor`]
//! handle. Handles are acquired per worker and released on drop, so
//! concurrent evaluations never alias the engine's scratch buffers.

use crate::geometry::Roi;
use crate::image::{ImInfo, ImageView};

mod recorded;

pub use recorded::{RecordedEngine, RecordedEngineError, RecordedRegion};

/// Preprocessing parameters handed to the proposal stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preprocess {
    /// Resize metadata for the short-side target.
    pub info: ImInfo,
    /// Per-channel BGR mean subtracted before inference.
    pub mean_vals: [f32; 3],
    /// Worker count hint for the engine.
    pub num_threads: usize,
}

/// Output of the proposal stage for one image.
#[derive(Clone, Debug)]
pub struct Proposals<F> {
    /// Image-level feature state shared read-only by all region evaluations.
    pub features: F,
    /// Proposed regions in scaled coordinates.
    pub rois: Vec<Roi>,
}

/// Raw network outputs for a single region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionOutput {
    /// Class probabilities, index 0 is background.
    pub scores: Vec<f32>,
    /// Box regression deltas in `(dx, dy, dw, dh)` groups.
    pub deltas: Vec<f32>,
}

/// Per-region extraction handle.
pub trait RegionExtractor {
    type Features;
    type Error: std::error::Error;

    /// Evaluates proposal `index` against the shared features.
    fn evaluate(
        &mut self,
        features: &Self::Features,
        index: usize,
        roi: &Roi,
    ) -> Result<RegionOutput, Self::Error>;
}

/// Two-stage detector backend.
pub trait DetectionEngine: Sync {
    type Features: Sync;
    type Error: std::error::Error;
    type Extractor<'a>: RegionExtractor<Features = Self::Features, Error = Self::Error>
    where
        Self: 'a;

    /// Number of classes including background.
    fn num_classes(&self) -> usize;

    /// Runs the feature and proposal stages for one image.
    fn propose(
        &self,
        image: ImageView<'_>,
        preprocess: &Preprocess,
    ) -> Result<Proposals<Self::Features>, Self::Error>;

    /// Acquires a fresh extraction handle.
    fn extractor(&self) -> Self::Extractor<'_>;
}

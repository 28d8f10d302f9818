//! High-level detector: proposals in, ranked detections out.

mod config;
mod evaluate;

pub use config::{DetectorConfig, VOC_CLASSES};

use crate::candidate::rank::rank_top_k;
use crate::decode::{DecodeParams, Detection};
use crate::engine::{DetectionEngine, Preprocess, Proposals};
use crate::image::{ImInfo, ImageView};
use crate::trace::{trace_event, trace_span};
use crate::util::{RoiDecodeError, RoiDecodeResult};

/// Two-stage detector post-processing bound to an engine.
///
/// Holds only read-only state after construction, so one detector can serve
/// several images concurrently when the engine is `Sync`.
pub struct Detector<E> {
    engine: E,
    config: DetectorConfig,
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl<E: DetectionEngine> Detector<E> {
    /// Validates `config` against the engine and builds the detector.
    pub fn new(engine: E, config: DetectorConfig) -> RoiDecodeResult<Self> {
        config.validate()?;
        let expected = engine.num_classes();
        if config.class_names.len() != expected {
            return Err(RoiDecodeError::ClassCountMismatch {
                expected,
                got: config.class_names.len(),
            });
        }

        #[cfg(feature = "rayon")]
        let pool = if config.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.num_threads)
                .build()
                .map_err(|err| RoiDecodeError::ThreadPool {
                    reason: err.to_string(),
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            engine,
            config,
            #[cfg(feature = "rayon")]
            pool,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Name of class `label`, if it exists.
    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.config.class_names.get(label).map(String::as_str)
    }

    /// Runs the full pipeline on one BGR image.
    ///
    /// Fails only if the engine's proposal stage fails; per-region failures
    /// are skipped.
    pub fn detect(&self, image: ImageView<'_>) -> RoiDecodeResult<Vec<Detection>> {
        let _span = trace_span!("detect", width = image.width(), height = image.height()).entered();

        let info = ImInfo::for_target_size(image.width(), image.height(), self.config.target_size)?;
        let preprocess = Preprocess {
            info,
            mean_vals: self.config.mean_vals,
            num_threads: self.config.num_threads,
        };
        let proposals = self
            .engine
            .propose(image, &preprocess)
            .map_err(|err| RoiDecodeError::Engine {
                reason: err.to_string(),
            })?;
        trace_event!("proposals", count = proposals.rois.len());

        Ok(self.detect_proposals(&proposals, image.width(), image.height(), info.scale))
    }

    /// Runs evaluation, decoding, suppression and ranking on proposals that
    /// were already produced for an image of `image_width x image_height`.
    pub fn detect_proposals(
        &self,
        proposals: &Proposals<E::Features>,
        image_width: usize,
        image_height: usize,
        scale: f32,
    ) -> Vec<Detection> {
        let params = DecodeParams {
            image_width,
            image_height,
            scale,
            confidence_thresh: self.config.confidence_thresh,
            delta_layout: self.config.delta_layout,
        };
        let num_classes = self.config.num_classes();

        let buckets = self.evaluate(proposals, &params, num_classes);

        let _span = trace_span!("suppress", candidates = buckets.len()).entered();
        let kept = buckets.suppress(self.config.nms_threshold);
        let ranked = rank_top_k(kept, self.config.max_per_image);
        trace_event!("detections", count = ranked.len());
        ranked
    }

    #[cfg(feature = "rayon")]
    fn evaluate(
        &self,
        proposals: &Proposals<E::Features>,
        params: &DecodeParams,
        num_classes: usize,
    ) -> crate::candidate::bucket::ClassBuckets {
        match &self.pool {
            Some(pool) => {
                evaluate::evaluate_regions_par(pool, &self.engine, proposals, params, num_classes)
            }
            None => evaluate::evaluate_regions(&self.engine, proposals, params, num_classes),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn evaluate(
        &self,
        proposals: &Proposals<E::Features>,
        params: &DecodeParams,
        num_classes: usize,
    ) -> crate::candidate::bucket::ClassBuckets {
        evaluate::evaluate_regions(&self.engine, proposals, params, num_classes)
    }
}

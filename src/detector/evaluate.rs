//! Per-region evaluation: engine extraction followed by decoding.
//!
//! A region whose extraction fails, or whose outputs do not fit the model's
//! class count or delta layout, is skipped with a warning. Skips never abort
//! the image.

use crate::candidate::bucket::ClassBuckets;
use crate::decode::{decode_region, DecodeParams, Decoded, Detection};
use crate::engine::{DetectionEngine, Proposals, RegionExtractor};
use crate::geometry::Roi;
use crate::trace::{trace_event, trace_span, trace_warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

fn evaluate_one<X: RegionExtractor>(
    extractor: &mut X,
    features: &X::Features,
    index: usize,
    roi: &Roi,
    params: &DecodeParams,
    num_classes: usize,
) -> Option<Detection> {
    let output = match extractor.evaluate(features, index, roi) {
        Ok(output) => output,
        Err(err) => {
            trace_warn!("region_skipped", index = index, reason = err);
            return None;
        }
    };

    if output.scores.len() != num_classes {
        trace_warn!(
            "region_skipped",
            index = index,
            reason = "score length mismatch",
            scores = output.scores.len(),
        );
        return None;
    }

    match decode_region(roi, &output.scores, &output.deltas, params) {
        Decoded::Detection(det) => Some(det),
        Decoded::Rejected => None,
        Decoded::MissingDeltas { label, len } => {
            trace_warn!(
                "region_skipped",
                index = index,
                reason = "delta vector too short",
                label = label,
                deltas = len,
            );
            None
        }
    }
}

/// Evaluates every proposal on the calling thread with one extractor.
pub(crate) fn evaluate_regions<E: DetectionEngine>(
    engine: &E,
    proposals: &Proposals<E::Features>,
    params: &DecodeParams,
    num_classes: usize,
) -> ClassBuckets {
    let _span = trace_span!("evaluate_regions", regions = proposals.rois.len()).entered();

    let mut buckets = ClassBuckets::new(num_classes);
    let mut extractor = engine.extractor();
    for (index, roi) in proposals.rois.iter().enumerate() {
        if let Some(det) = evaluate_one(
            &mut extractor,
            &proposals.features,
            index,
            roi,
            params,
            num_classes,
        ) {
            buckets.push(det);
        }
    }

    trace_event!("candidates", count = buckets.len());
    buckets
}

/// Evaluates proposals across `pool`, one extractor per worker split.
///
/// Results are collected in proposal order, so bucket contents match the
/// sequential path exactly.
#[cfg(feature = "rayon")]
pub(crate) fn evaluate_regions_par<E: DetectionEngine>(
    pool: &rayon::ThreadPool,
    engine: &E,
    proposals: &Proposals<E::Features>,
    params: &DecodeParams,
    num_classes: usize,
) -> ClassBuckets {
    let _span = trace_span!(
        "evaluate_regions",
        regions = proposals.rois.len(),
        parallel = true
    )
    .entered();

    let features = &proposals.features;
    let results: Vec<Option<Detection>> = pool.install(|| {
        proposals
            .rois
            .par_iter()
            .enumerate()
            .map_init(
                || engine.extractor(),
                |extractor, (index, roi)| {
                    evaluate_one(extractor, features, index, roi, params, num_classes)
                },
            )
            .collect()
    });

    let mut buckets = ClassBuckets::new(num_classes);
    buckets.extend(results.into_iter().flatten());

    trace_event!("candidates", count = buckets.len());
    buckets
}

//! Greedy IoU non-maximum suppression within one class.

use crate::candidate::rank::sort_detections_desc;
use crate::decode::Detection;
use crate::geometry::iou_from_areas;

/// Picks detections from a list already sorted by descending score.
///
/// A detection is kept unless its IoU with any previously kept detection
/// exceeds `nms_threshold`. Returns indices into `sorted`, in order.
pub fn nms_sorted_indices(sorted: &[Detection], nms_threshold: f32) -> Vec<usize> {
    let areas: Vec<f32> = sorted.iter().map(|det| det.rect.area()).collect();
    let mut picked: Vec<usize> = Vec::new();

    for (i, a) in sorted.iter().enumerate() {
        let suppressed = picked.iter().any(|&j| {
            let inter = a.rect.intersection_area(&sorted[j].rect);
            iou_from_areas(inter, areas[i], areas[j]) > nms_threshold
        });
        if !suppressed {
            picked.push(i);
        }
    }

    picked
}

/// Sorts one class's detections by descending score (stable) and applies
/// greedy NMS, returning survivors in descending score order.
pub fn nms_per_class(mut detections: Vec<Detection>, nms_threshold: f32) -> Vec<Detection> {
    if detections.len() <= 1 {
        return detections;
    }
    sort_detections_desc(&mut detections);
    let picked = nms_sorted_indices(&detections, nms_threshold);
    picked.into_iter().map(|idx| detections[idx]).collect()
}

//! Score ordering and the global top-K cut.

use crate::decode::Detection;
use std::cmp::Ordering;

fn detection_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Sorts detections by descending score; equal scores keep their order.
pub(crate) fn sort_detections_desc(detections: &mut [Detection]) {
    detections.sort_by(detection_cmp_desc);
}

/// Sorts the merged survivors and keeps the `max_per_image` best.
pub fn rank_top_k(mut detections: Vec<Detection>, max_per_image: usize) -> Vec<Detection> {
    sort_detections_desc(&mut detections);
    detections.truncate(max_per_image);
    detections
}

#[cfg(test)]
mod tests {
    use super::rank_top_k;
    use crate::decode::Detection;
    use crate::geometry::Rect;

    fn det(label: usize, score: f32) -> Detection {
        Detection {
            rect: Rect::default(),
            label,
            score,
        }
    }

    #[test]
    fn ranks_across_classes_and_truncates() {
        let ranked = rank_top_k(vec![det(1, 0.7), det(2, 0.95), det(3, 0.8)], 2);
        assert_eq!(ranked, vec![det(2, 0.95), det(3, 0.8)]);
    }

    #[test]
    fn short_lists_pass_through() {
        let ranked = rank_top_k(vec![det(4, 0.6), det(1, 0.6)], 10);
        assert_eq!(ranked, vec![det(4, 0.6), det(1, 0.6)]);
    }
}

//! Per-class grouping of decoded detections.

use crate::candidate::nms::nms_per_class;
use crate::decode::Detection;

/// Label-indexed buckets, pre-sized to the model's class count.
#[derive(Clone, Debug)]
pub struct ClassBuckets {
    buckets: Vec<Vec<Detection>>,
}

impl ClassBuckets {
    /// Creates one empty bucket per class.
    pub fn new(num_classes: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); num_classes],
        }
    }

    /// Appends `det` to its label's bucket.
    ///
    /// Labels beyond the pre-sized range are ignored; the decoder only emits
    /// labels below the score vector length, which is checked upstream.
    pub fn push(&mut self, det: Detection) {
        if let Some(bucket) = self.buckets.get_mut(det.label) {
            bucket.push(det);
        }
    }

    /// Total number of bucketed detections.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Detections collected for `label`, in arrival order.
    pub fn get(&self, label: usize) -> &[Detection] {
        self.buckets.get(label).map_or(&[], Vec::as_slice)
    }

    /// Runs per-class NMS and concatenates survivors in label order.
    pub fn suppress(self, nms_threshold: f32) -> Vec<Detection> {
        let mut out = Vec::new();
        for bucket in self.buckets.into_iter().filter(|b| !b.is_empty()) {
            out.extend(nms_per_class(bucket, nms_threshold));
        }
        out
    }
}

impl Extend<Detection> for ClassBuckets {
    fn extend<I: IntoIterator<Item = Detection>>(&mut self, iter: I) {
        for det in iter {
            self.push(det);
        }
    }
}

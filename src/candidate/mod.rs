//! Candidate grouping, suppression, and ranking.
//!
//! Detections are bucketed by class, suppressed per class with greedy IoU
//! NMS, then merged and truncated to the per-image cap.

pub(crate) mod bucket;
pub(crate) mod nms;
pub(crate) mod rank;

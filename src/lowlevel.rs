//! Low-level building blocks for custom post-processing pipelines.
//!
//! These expose the individual stages behind [`crate::Detector`] so callers
//! with their own evaluation loop can decode, bucket, suppress and rank
//! directly.

pub use crate::candidate::bucket::ClassBuckets;
pub use crate::candidate::nms::{nms_per_class, nms_sorted_indices};
pub use crate::candidate::rank::rank_top_k;
pub use crate::decode::{apply_deltas, clip_corners, decode_region, DecodeParams, Decoded};

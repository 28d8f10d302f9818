//! Per-region detection decoding.
//!
//! Turns one proposal plus its class scores and regression deltas into at
//! most one [`Detection`]: best-class selection, confidence gate, centre-size
//! box regression in original image coordinates, then clipping to the image.

use crate::geometry::{Rect, Roi};
use crate::util::math::{argmax_first, clip};

/// Final detection in original image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Clipped box; `w`/`h` follow the inclusive `+1` convention.
    pub rect: Rect,
    /// Class index, never the background class.
    pub label: usize,
    /// Probability of `label`, strictly above the confidence threshold.
    pub score: f32,
}

impl Detection {
    /// Looks up this detection's class name in `names`.
    pub fn class_name<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Option<&'a str> {
        names.get(self.label).map(|name| name.as_ref())
    }
}

/// Where the four regression deltas for a label live in the delta vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaLayout {
    /// One shared group at a fixed offset, regardless of label.
    ClassAgnostic { offset: usize },
    /// One group per class at `4 * label`.
    PerClass,
}

impl Default for DeltaLayout {
    /// Agnostic head with background and foreground groups.
    fn default() -> Self {
        DeltaLayout::ClassAgnostic { offset: 4 }
    }
}

impl DeltaLayout {
    /// Start index of the `(dx, dy, dw, dh)` group for `label`.
    pub fn offset(&self, label: usize) -> usize {
        match *self {
            DeltaLayout::ClassAgnostic { offset } => offset,
            DeltaLayout::PerClass => 4 * label,
        }
    }

    /// Returns the four deltas for `label`, or `None` if the vector is short.
    pub fn select(&self, deltas: &[f32], label: usize) -> Option<[f32; 4]> {
        let start = self.offset(label);
        let group = deltas.get(start..start.checked_add(4)?)?;
        Some([group[0], group[1], group[2], group[3]])
    }
}

/// Image-level inputs to [`decode_region`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeParams {
    /// Original image width in pixels.
    pub image_width: usize,
    /// Original image height in pixels.
    pub image_height: usize,
    /// Resize factor between original and proposal coordinates.
    pub scale: f32,
    /// Scores at or below this value are rejected.
    pub confidence_thresh: f32,
    pub delta_layout: DeltaLayout,
}

/// Outcome of decoding one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decoded {
    Detection(Detection),
    /// Best class is background or its score does not pass the gate.
    Rejected,
    /// Delta vector too short for the selected label.
    MissingDeltas { label: usize, len: usize },
}

/// Applies centre-size regression deltas to an unscaled proposal.
///
/// Returns raw `(x1, y1, x2, y2)` corners before clipping.
pub fn apply_deltas(roi: Roi, deltas: [f32; 4]) -> [f32; 4] {
    let [dx, dy, dw, dh] = deltas;
    let pw = roi.width();
    let ph = roi.height();

    let cx = roi.x1 + pw * 0.5;
    let cy = roi.y1 + ph * 0.5;

    let obj_cx = cx + pw * dx;
    let obj_cy = cy + ph * dy;
    let obj_w = pw * dw.exp();
    let obj_h = ph * dh.exp();

    [
        obj_cx - obj_w * 0.5,
        obj_cy - obj_h * 0.5,
        obj_cx + obj_w * 0.5,
        obj_cy + obj_h * 0.5,
    ]
}

/// Clamps corners into `[0, width-1] x [0, height-1]`.
pub fn clip_corners(corners: [f32; 4], image_width: usize, image_height: usize) -> [f32; 4] {
    let max_x = image_width as f32 - 1.0;
    let max_y = image_height as f32 - 1.0;
    [
        clip(corners[0], max_x),
        clip(corners[1], max_y),
        clip(corners[2], max_x),
        clip(corners[3], max_y),
    ]
}

/// Decodes a single region into at most one detection.
pub fn decode_region(roi: &Roi, scores: &[f32], deltas: &[f32], params: &DecodeParams) -> Decoded {
    let (label, score) = argmax_first(scores);
    if label == 0 || score <= params.confidence_thresh {
        return Decoded::Rejected;
    }

    let Some(group) = params.delta_layout.select(deltas, label) else {
        return Decoded::MissingDeltas {
            label,
            len: deltas.len(),
        };
    };

    let unscaled = roi.unscale(params.scale);
    let corners = apply_deltas(unscaled, group);
    let [x1, y1, x2, y2] = clip_corners(corners, params.image_width, params.image_height);

    Decoded::Detection(Detection {
        rect: Rect::from_corners(x1, y1, x2, y2),
        label,
        score,
    })
}

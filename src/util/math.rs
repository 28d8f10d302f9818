//! Numeric helpers shared by decoding and suppression.

/// Returns the index and value of the largest score.
///
/// The scan starts from `(0, 0.0)` and only moves on a strictly greater
/// score, so the lowest index wins exact ties and an all-non-positive vector
/// resolves to index 0.
pub(crate) fn argmax_first(scores: &[f32]) -> (usize, f32) {
    let mut label = 0usize;
    let mut best = 0.0f32;
    for (idx, &score) in scores.iter().enumerate() {
        if score > best {
            label = idx;
            best = score;
        }
    }
    (label, best)
}

/// Clamps `value` into `[0, max]`.
///
/// `max` may be negative only for degenerate images; the upper clamp is
/// applied first to mirror `max(min(v, hi), 0)`.
#[inline]
pub(crate) fn clip(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{argmax_first, clip};

    #[test]
    fn argmax_prefers_first_on_tie() {
        let (label, score) = argmax_first(&[0.1, 0.4, 0.4, 0.1]);
        assert_eq!(label, 1);
        assert!((score - 0.4).abs() < 1e-6);
    }

    #[test]
    fn argmax_defaults_to_background() {
        assert_eq!(argmax_first(&[]), (0, 0.0));
        assert_eq!(argmax_first(&[0.0, 0.0, 0.0]).0, 0);
    }

    #[test]
    fn clip_bounds_both_sides() {
        assert_eq!(clip(-3.0, 9.0), 0.0);
        assert_eq!(clip(12.0, 9.0), 9.0);
        assert_eq!(clip(4.5, 9.0), 4.5);
    }
}

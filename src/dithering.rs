pub mod luma_chroma;
pub mod ordered;
pub mod threshold;

use crate::utils::num::round_u8;

/// Level index of `value` against a threshold.
///
/// `base = floor(value / step)`; values strictly above `threshold` (after
/// normalization to `[0, 1]`) move one level up, capped at `max_level`.
/// Values at or below it keep `base`. The `base - 1` variant, scaled by the
/// truncated integer step, pushes mid tones a full level down and is not used.
#[inline(always)]
pub fn quantize_level(value: f64, threshold: f64, step: f64, max_level: f64) -> f64 {
    let base = (value / step).floor().min(max_level);
    if value / 255.0 > threshold {
        (base + 1.0).min(max_level)
    } else {
        base
    }
}

/// [quantize_level] scaled back by `step` and rounded to a channel value.
#[inline(always)]
pub fn dither_level(value: f64, threshold: f64, step: f64, max_level: f64) -> u8 {
    round_u8(quantize_level(value, threshold, step, max_level) * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_levels_around_half_threshold() {
        assert_eq!(dither_level(128.0, 0.5, 255.0, 1.0), 255);
        assert_eq!(dither_level(127.0, 0.5, 255.0, 1.0), 0);
        assert_eq!(dither_level(0.0, 0.0, 255.0, 1.0), 0);
        assert_eq!(dither_level(255.0, 0.75, 255.0, 1.0), 255);
    }

    #[test]
    fn test_quantize_level_caps() {
        assert_eq!(quantize_level(255.0, 0.1, 127.5, 2.0), 2.0);
        assert_eq!(quantize_level(127.5, 0.9, 127.5, 2.0), 1.0);
        assert_eq!(quantize_level(127.5, 0.1, 127.5, 2.0), 2.0);
    }

    #[test]
    fn test_levels_stay_on_grid() {
        let step = 255.0 / 3.0;
        for value in 0..=255u8 {
            for threshold in [0.0, 0.25, 0.5, 0.99] {
                let out = dither_level(value as f64, threshold, step, 3.0);
                assert!([0, 85, 170, 255].contains(&out), "{} -> {}", value, out);
            }
        }
    }
}

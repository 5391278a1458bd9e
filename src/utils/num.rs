use num_traits::Float;

/// Convert a float channel value to u8, truncating toward zero and
/// saturating to `[0, 255]`.
///
/// > NaN maps to 0
#[inline(always)]
pub fn saturate_u8<F: Float>(value: F) -> u8 {
    match value.to_u8() {
        Some(v) => v,
        None if value > F::zero() => u8::MAX,
        None => 0,
    }
}

/// Same as [saturate_u8], rounding to the nearest integer first.
#[inline(always)]
pub fn round_u8<F: Float>(value: F) -> u8 {
    saturate_u8(value.round())
}

/// Normalize an 8-bit channel to `[0.0, 1.0]`.
#[inline(always)]
pub fn normalize(value: u8) -> f64 {
    value as f64 / 255.0
}

/// Helper for asserting the parameter is strictly positive, NaN included.
#[inline]
pub fn is_positive<F: Float>(value: F) -> bool {
    value > F::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_u8_truncates() {
        assert_eq!(saturate_u8(0.0_f64), 0);
        assert_eq!(saturate_u8(12.9_f64), 12);
        assert_eq!(saturate_u8(254.999_f64), 254);
        assert_eq!(saturate_u8(255.0_f64), 255);
        assert_eq!(saturate_u8(255.7_f64), 255);
        assert_eq!(saturate_u8(-0.7_f64), 0);
    }

    #[test]
    fn test_saturate_u8_clamps() {
        assert_eq!(saturate_u8(1000.0_f64), 255);
        assert_eq!(saturate_u8(-1000.0_f64), 0);
        assert_eq!(saturate_u8(f64::INFINITY), 255);
        assert_eq!(saturate_u8(f64::NEG_INFINITY), 0);
        assert_eq!(saturate_u8(f64::NAN), 0);
        assert_eq!(saturate_u8(300.0_f32), 255);
    }

    #[test]
    fn test_round_u8() {
        assert_eq!(round_u8(254.5_f64), 255);
        assert_eq!(round_u8(254.49_f64), 254);
        assert_eq!(round_u8(-0.4_f64), 0);
        assert_eq!(round_u8(127.5_f64), 128);
    }

    #[test]
    fn test_is_positive() {
        assert!(is_positive(0.1_f64));
        assert!(!is_positive(0.0_f64));
        assert!(!is_positive(-2.0_f64));
        assert!(!is_positive(f64::NAN));
    }
}

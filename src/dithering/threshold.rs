use std::fmt::Display;

use crate::{
    error::{FilterError, Result},
    utils::transform::precompute_tiled_rows,
};

/// Canonical 2x2 Bayer matrix, normalized to `[0, 1)`.
pub const BAYER_2X2: [f64; 4] = [0.0, 0.5, 0.75, 0.25];

/// Square matrix of thresholds in `[0, 1)`, tiled over the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMap {
    size: usize,
    values: Vec<f64>,
}

impl ThresholdMap {
    /// Generate an `size`x`size` map.
    ///
    /// Size 2 is the Bayer matrix, other sizes use
    /// `cell(y, x) = (((x ^ y) * S + x) mod S²) / S²`.
    pub fn generate(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(FilterError::invalid(
                "map_size",
                format!("must be at least 2, got {}", size),
            ));
        }
        if size == 2 {
            return Ok(Self {
                size,
                values: BAYER_2X2.to_vec(),
            });
        }

        let cells = size * size;
        let values = precompute_tiled_rows(size, size, |x, y, _| {
            (((x ^ y) * size + x) % cells) as f64 / cells as f64
        });
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Threshold for pixel (x, y), the map repeats in both directions.
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[(y % self.size) * self.size + (x % self.size)]
    }

    /// `size` rows of `width` thresholds, row `y % size` applies to image row `y`.
    pub fn tiled_rows(&self, width: usize) -> Vec<f64> {
        precompute_tiled_rows(self.size, width, |x, y, _| {
            self.values[y * self.size + x % self.size]
        })
    }
}

impl Display for ThresholdMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values.chunks_exact(self.size) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_two_is_bayer() {
        let map = ThresholdMap::generate(2).unwrap();
        assert_eq!(map.get(0, 0), 0.0);
        assert_eq!(map.get(1, 0), 0.5);
        assert_eq!(map.get(0, 1), 0.75);
        assert_eq!(map.get(1, 1), 0.25);
        assert_eq!(map.get(3, 2), 0.5);
    }

    #[test]
    fn test_generated_values_in_unit_range() {
        for size in 2..=8 {
            let map = ThresholdMap::generate(size).unwrap();
            assert_eq!(map.values().len(), size * size);
            assert!(map.values().iter().all(|v| (0.0..1.0).contains(v)), "{}", size);
        }
    }

    #[test]
    fn test_three_by_three_formula() {
        let map = ThresholdMap::generate(3).unwrap();
        // y = 0: x ^ 0 = x, (3x + x) mod 9
        assert_eq!(map.get(0, 0), 0.0);
        assert_eq!(map.get(1, 0), 4.0 / 9.0);
        assert_eq!(map.get(2, 0), 8.0 / 9.0);
        // y = 1, x = 0: ((0 ^ 1) * 3 + 0) mod 9 = 3
        assert_eq!(map.get(0, 1), 3.0 / 9.0);
        // y = 2, x = 1: ((1 ^ 2) * 3 + 1) mod 9 = 10 mod 9 = 1
        assert_eq!(map.get(1, 2), 1.0 / 9.0);
    }

    #[test]
    fn test_rejects_small_maps() {
        assert!(ThresholdMap::generate(0).is_err());
        assert!(ThresholdMap::generate(1).is_err());
    }

    #[test]
    fn test_tiled_rows_match_get() {
        let map = ThresholdMap::generate(4).unwrap();
        let rows = map.tiled_rows(11);
        for y in 0..4 {
            for x in 0..11 {
                assert_eq!(rows[y * 11 + x], map.get(x, y));
            }
        }
    }
}

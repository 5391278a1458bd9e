use imagefilter_macros::simd_targets;

use crate::{
    dithering::{dither_level, threshold::ThresholdMap},
    error::{FilterError, Result},
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::Strategy,
    utils::pixel::Rgba,
};

/// Ordered (threshold map) dithering of R, G and B to `levels` evenly spaced
/// values. Alpha passes through.
#[derive(Debug, Clone)]
pub struct OrderedDither {
    map: ThresholdMap,
    levels: usize,
    strategy: Strategy,
    /// thresholds tiled to the current row width
    rows: Vec<f64>,
    rows_width: usize,
}

impl OrderedDither {
    pub fn new(map_size: usize, levels: usize) -> Result<Self> {
        if levels < 2 {
            return Err(FilterError::invalid(
                "levels",
                format!("must be at least 2, got {}", levels),
            ));
        }
        Ok(Self {
            map: ThresholdMap::generate(map_size)?,
            levels,
            strategy: Strategy::Auto,
            rows: Vec::new(),
            rows_width: 0,
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn map(&self) -> &ThresholdMap {
        &self.map
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Distance between two output levels.
    pub fn step(&self) -> f64 {
        255.0 / (self.levels - 1) as f64
    }

    fn ensure_rows(&mut self, width: usize) {
        if self.rows_width != width || self.rows.is_empty() {
            self.rows = self.map.tiled_rows(width);
            self.rows_width = width;
        }
    }
}

impl TextureTransform for OrderedDither {
    type Input = Rgba;
    type Output = Rgba;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let shape = input.shape();
        let width = shape.0;
        self.ensure_rows(width);

        let in_buf = input.buffer();
        let map_size = self.map.size();
        let step = self.step();
        let max_level = (self.levels - 1) as f64;
        let rows = &self.rows;
        self.strategy
            .resolve(shape)
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let start = y * width;
                let tile_start = (y % map_size) * width;
                ordered_row(
                    &in_buf[start..start + width],
                    &rows[tile_start..tile_start + width],
                    step,
                    max_level,
                    out_row,
                );
            });
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, _: Shape) {
        self.ensure_rows(in_shape.0);
    }
}

#[simd_targets]
fn ordered_row(
    in_row: &[Rgba],
    thresholds: &[f64],
    step: f64,
    max_level: f64,
    out_row: &mut [Rgba],
) {
    out_row
        .iter_mut()
        .zip(in_row.iter().zip(thresholds.iter()))
        .for_each(|(dst, (src, threshold))| {
            *dst = src.map_rgb(|c| dither_level(c as f64, *threshold, step, max_level));
        });
}

pub fn ordered_dither(
    texture: &Texture<Rgba>,
    map_size: usize,
    levels: usize,
) -> Result<Texture<Rgba>> {
    Ok(OrderedDither::new(map_size, levels)?.process(texture))
}

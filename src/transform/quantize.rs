use std::collections::HashMap;

use crate::{
    color_palette::{ColorFrequency, Palette},
    error::{FilterError, Result},
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::Strategy,
    utils::pixel::Rgba,
};

/// Popularity quantization: keep the `num_colors` most frequent colours and
/// snap every pixel to the nearest one. Alpha passes through.
///
/// The palette depends on the whole image, it is rebuilt on every apply.
#[derive(Debug, Clone)]
pub struct PopularityQuantization {
    num_colors: usize,
    strategy: Strategy,
}

impl PopularityQuantization {
    pub fn new(num_colors: usize) -> Result<Self> {
        if num_colors == 0 {
            return Err(FilterError::invalid(
                "num_colors",
                "must be at least 1, got 0",
            ));
        }
        Ok(Self {
            num_colors,
            strategy: Strategy::Auto,
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }
}

impl TextureTransform for PopularityQuantization {
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
        let in_buf = input.buffer();
        if in_buf.is_empty() {
            return (input, output);
        }

        let frequency = ColorFrequency::from_buffer(in_buf);
        let palette = Palette::most_frequent(&frequency, self.num_colors);

        // each distinct colour is matched once
        let mapping: HashMap<[u8; 3], [u8; 3]> = frequency
            .colors()
            .filter_map(|rgb| palette.nearest(rgb).map(|nearest| (rgb, nearest)))
            .collect();

        let shape = input.shape();
        let width = shape.0;
        self.strategy
            .resolve(shape)
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let start = y * width;
                out_row
                    .iter_mut()
                    .zip(in_buf[start..start + width].iter())
                    .for_each(|(dst, src)| {
                        let rgb = mapping.get(&src.rgb()).copied().unwrap_or(src.rgb());
                        *dst = Rgba::from_rgb(rgb, src.a);
                    });
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

pub fn quantize_popularity(texture: &Texture<Rgba>, num_colors: usize) -> Result<Texture<Rgba>> {
    Ok(PopularityQuantization::new(num_colors)?.process(texture))
}

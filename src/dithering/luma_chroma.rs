use imagefilter_macros::simd_targets;

use crate::{
    dithering::{quantize_level, threshold::ThresholdMap},
    error::Result,
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::Strategy,
    utils::{
        num::round_u8,
        pixel::{BT601_LUMA_F64, Rgba},
    },
};

/// Side of the threshold map used on the luma channel.
pub const LUMA_MAP_SIZE: usize = 3;
/// Luma is dithered to 0, 127.5 and 255.
pub const LUMA_STEP: f64 = 127.5;
const LUMA_MAX_LEVEL: f64 = 2.0;

/// BT.601 full range luma / chroma triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YCbCr {
    pub y: f64,
    pub cb: f64,
    pub cr: f64,
}

impl YCbCr {
    #[inline(always)]
    pub fn from_rgba(pixel: Rgba) -> Self {
        let (r, g, b) = (pixel.r as f64, pixel.g as f64, pixel.b as f64);
        Self {
            y: BT601_LUMA_F64[0] * r + BT601_LUMA_F64[1] * g + BT601_LUMA_F64[2] * b,
            cb: 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b,
            cr: 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b,
        }
    }

    /// Back to 8-bit RGB, rounded and clamped.
    #[inline(always)]
    pub fn to_rgb(self) -> [u8; 3] {
        let cb = self.cb - 128.0;
        let cr = self.cr - 128.0;
        [
            round_u8(self.y + 1.402 * cr),
            round_u8(self.y - 0.344136 * cb - 0.714136 * cr),
            round_u8(self.y + 1.772 * cb),
        ]
    }
}

/// Dithers only the luma of each pixel with a 3x3 threshold map, keeping the
/// original chroma. Output is opaque.
#[derive(Debug, Clone)]
pub struct LumaChromaDither {
    map: ThresholdMap,
    strategy: Strategy,
}

impl LumaChromaDither {
    pub fn new() -> Result<Self> {
        Ok(Self {
            map: ThresholdMap::generate(LUMA_MAP_SIZE)?,
            strategy: Strategy::Auto,
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl TextureTransform for LumaChromaDither {
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
        let in_buf = input.buffer();
        let map = &self.map;
        self.strategy
            .resolve(shape)
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let start = y * width;
                luma_chroma_row(&in_buf[start..start + width], map, y, out_row);
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[simd_targets]
fn luma_chroma_row(in_row: &[Rgba], map: &ThresholdMap, y: usize, out_row: &mut [Rgba]) {
    out_row
        .iter_mut()
        .zip(in_row.iter())
        .enumerate()
        .for_each(|(x, (dst, src))| {
            let mut color = YCbCr::from_rgba(*src);
            let level = quantize_level(color.y, map.get(x, y), LUMA_STEP, LUMA_MAX_LEVEL);
            color.y = level * LUMA_STEP;
            *dst = Rgba::from_rgb(color.to_rgb(), 255);
        });
}

pub fn luma_chroma_dither(texture: &Texture<Rgba>) -> Result<Texture<Rgba>> {
    Ok(LumaChromaDither::new()?.process(texture))
}

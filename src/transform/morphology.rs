use imagefilter_macros::simd_targets;

use crate::{
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::Strategy,
    utils::pixel::Rgba,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Per-channel maximum of the 3x3 window.
    Dilate,
    /// Per-channel minimum of the 3x3 window.
    Erode,
}

impl MorphOp {
    #[inline(always)]
    fn combine(self, a: u8, b: u8) -> u8 {
        match self {
            MorphOp::Dilate => a.max(b),
            MorphOp::Erode => a.min(b),
        }
    }
}

/// 3x3 grey-level morphology. The outer ring of pixels is copied, alpha
/// comes from the center pixel.
#[derive(Debug, Clone, Copy)]
pub struct Morphology {
    op: MorphOp,
    strategy: Strategy,
}

impl Morphology {
    pub fn new(op: MorphOp) -> Self {
        Self {
            op,
            strategy: Strategy::Auto,
        }
    }

    pub fn dilate() -> Self {
        Self::new(MorphOp::Dilate)
    }

    pub fn erode() -> Self {
        Self::new(MorphOp::Erode)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl TextureTransform for Morphology {
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
        let in_buf = input.buffer();
        let op = self.op;
        self.strategy
            .resolve(shape)
            .for_each_row(output.as_mut(), shape.0, |y, out_row| {
                morphology_row(in_buf, shape, y, op, out_row);
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[simd_targets]
fn morphology_row(in_buf: &[Rgba], shape: Shape, y: usize, op: MorphOp, out_row: &mut [Rgba]) {
    let (width, height) = shape;
    let row_start = y * width;
    let in_row = &in_buf[row_start..row_start + width];

    if y == 0 || y + 1 >= height {
        out_row.copy_from_slice(in_row);
        return;
    }

    for (x, dst) in out_row.iter_mut().enumerate() {
        let center = in_row[x];
        if x == 0 || x + 1 >= width {
            *dst = center;
            continue;
        }

        let mut acc = center;
        for wy in y - 1..=y + 1 {
            let start = wy * width + x - 1;
            for pixel in &in_buf[start..start + 3] {
                acc.r = op.combine(acc.r, pixel.r);
                acc.g = op.combine(acc.g, pixel.g);
                acc.b = op.combine(acc.b, pixel.b);
            }
        }
        *dst = Rgba::new(acc.r, acc.g, acc.b, center.a);
    }
}

pub fn dilate(texture: &Texture<Rgba>) -> Texture<Rgba> {
    Morphology::dilate().process(texture)
}

pub fn erode(texture: &Texture<Rgba>) -> Texture<Rgba> {
    Morphology::erode().process(texture)
}

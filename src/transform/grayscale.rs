use imagefilter_macros::simd_targets;

use crate::{
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::Strategy,
    utils::pixel::Rgba,
};

/// BT.601 luma on every channel, alpha forced opaque.
///
/// `V = floor(0.299 R + 0.587 G + 0.114 B)`, output `(V, V, V, 255)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale {
    strategy: Strategy,
}

impl Grayscale {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }
}

impl TextureTransform for Grayscale {
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
        let width = input.width() as usize;
        let in_buf = input.buffer();
        self.strategy
            .resolve(input.shape())
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let start = y * width;
                grayscale_row(&in_buf[start..start + width], out_row);
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[simd_targets]
fn grayscale_row(in_row: &[Rgba], out_row: &mut [Rgba]) {
    out_row
        .iter_mut()
        .zip(in_row.iter())
        .for_each(|(dst, src)| {
            let v = src.luma();
            *dst = Rgba::new(v, v, v, 255);
        });
}

pub fn grayscale(texture: &Texture<Rgba>) -> Texture<Rgba> {
    Grayscale::default().process(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_image_scenario() {
        let src = Texture::filled(4, 4, Rgba::new(255, 0, 0, 255));
        let out = grayscale(&src);
        assert_eq!(out.shape(), (4, 4));
        assert!(out.as_ref().iter().all(|p| *p == Rgba::new(76, 76, 76, 255)));
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let src = Texture::from_vec(
            3,
            1,
            vec![
                Rgba::new(10, 20, 30, 0),
                Rgba::new(255, 255, 255, 17),
                Rgba::new(1, 2, 3, 255),
            ],
        )
        .unwrap();
        let out = grayscale(&src);
        assert!(out.as_ref().iter().all(|p| p.a == 255 && p.r == p.g && p.g == p.b));
        // 0.299 * 10 + 0.587 * 20 + 0.114 * 30 = 18.15
        assert_eq!(out.as_ref()[0].r, 18);
        assert_eq!(out.as_ref()[1].r, 255);
    }
}

//! Per-pixel tone operators.
//!
//! Every operator here is a function of a single channel value, so each one is
//! compiled down to a [Lut] once and applied with the same row kernel. Alpha
//! always passes through.

use imagefilter_macros::simd_targets;

use crate::{
    error::{FilterError, Result},
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    tone_curve::Lut,
    transform::Strategy,
    utils::{
        num::{is_positive, normalize, round_u8, saturate_u8},
        pixel::Rgba,
    },
};

/// Channel-wise transform backed by a 256-entry table.
#[derive(Debug, Clone)]
pub struct PointTransform {
    lut: Lut,
    strategy: Strategy,
}

impl Default for PointTransform {
    fn default() -> Self {
        Self::lut(Lut::identity())
    }
}

impl PointTransform {
    /// Remap R, G, B through `lut`.
    pub fn lut(lut: Lut) -> Self {
        Self {
            lut,
            strategy: Strategy::Auto,
        }
    }

    /// `255 - c`
    pub fn invert() -> Self {
        Self::lut(Lut::from_fn(|c| 255 - c))
    }

    /// `clamp(c + factor, 0, 255)`
    pub fn brightness(factor: i32) -> Self {
        Self::lut(Lut::from_fn(|c| {
            (c as i32).saturating_add(factor).clamp(0, 255) as u8
        }))
    }

    /// `clamp((c - 128) * factor + 128, 0, 255)`, truncated toward zero.
    pub fn contrast(factor: f64) -> Result<Self> {
        if !factor.is_finite() {
            return Err(FilterError::invalid(
                "factor",
                format!("must be a finite number, got {}", factor),
            ));
        }
        Ok(Self::lut(Lut::from_fn(|c| {
            saturate_u8((c as f64 - 128.0) * factor + 128.0)
        })))
    }

    /// `(c / 255) ^ gamma * 255`, rounded to the nearest level.
    pub fn gamma(gamma: f64) -> Result<Self> {
        if !is_positive(gamma) {
            return Err(FilterError::invalid(
                "gamma",
                format!("must be greater than 0, got {}", gamma),
            ));
        }
        Ok(Self::lut(Lut::from_fn(|c| {
            round_u8(normalize(c).powf(gamma) * 255.0)
        })))
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn table(&self) -> &Lut {
        &self.lut
    }
}

impl TextureTransform for PointTransform {
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
        let table = self.lut.as_array();
        self.strategy
            .resolve(input.shape())
            .for_each_row(output.as_mut(), width, |y, out_row| {
                let start = y * width;
                lut_row(&in_buf[start..start + width], out_row, table);
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[simd_targets]
fn lut_row(in_row: &[Rgba], out_row: &mut [Rgba], table: &[u8; 256]) {
    out_row
        .iter_mut()
        .zip(in_row.iter())
        .for_each(|(dst, src)| {
            *dst = Rgba::new(
                table[src.r as usize],
                table[src.g as usize],
                table[src.b as usize],
                src.a,
            );
        });
}

pub fn invert(texture: &Texture<Rgba>) -> Texture<Rgba> {
    PointTransform::invert().process(texture)
}

pub fn brightness(texture: &Texture<Rgba>, factor: i32) -> Texture<Rgba> {
    PointTransform::brightness(factor).process(texture)
}

pub fn contrast(texture: &Texture<Rgba>, factor: f64) -> Result<Texture<Rgba>> {
    Ok(PointTransform::contrast(factor)?.process(texture))
}

pub fn gamma(texture: &Texture<Rgba>, gamma: f64) -> Result<Texture<Rgba>> {
    Ok(PointTransform::gamma(gamma)?.process(texture))
}

pub fn apply_lut(texture: &Texture<Rgba>, lut: &Lut) -> Texture<Rgba> {
    PointTransform::lut(*lut).process(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(pixel: Rgba) -> Texture<Rgba> {
        Texture::filled(1, 1, pixel)
    }

    fn pixel(texture: &Texture<Rgba>) -> Rgba {
        texture.as_ref()[0]
    }

    #[test]
    fn test_invert_keeps_alpha() {
        let out = invert(&single(Rgba::new(0, 100, 255, 42)));
        assert_eq!(pixel(&out), Rgba::new(255, 155, 0, 42));
    }

    #[test]
    fn test_brightness_clamps() {
        let src = single(Rgba::new(100, 250, 3, 7));
        assert_eq!(pixel(&brightness(&src, 300)), Rgba::new(255, 255, 255, 7));
        assert_eq!(pixel(&brightness(&src, -5)), Rgba::new(95, 245, 0, 7));
        assert_eq!(pixel(&brightness(&src, i32::MAX)), Rgba::new(255, 255, 255, 7));
        assert_eq!(pixel(&brightness(&src, i32::MIN)), Rgba::new(0, 0, 0, 7));
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let src = single(Rgba::new(128, 138, 100, 255));
        // (138 - 128) * 1.5 + 128 = 143, (100 - 128) * 1.5 + 128 = 86
        assert_eq!(pixel(&contrast(&src, 1.5).unwrap()), Rgba::new(128, 143, 86, 255));
        // (100 - 128) * 0.3 + 128 = 119.6 -> 119
        assert_eq!(pixel(&contrast(&src, 0.3).unwrap()).b, 119);
        assert_eq!(pixel(&contrast(&src, 100.0).unwrap()), Rgba::new(128, 255, 0, 255));
    }

    #[test]
    fn test_gamma_values() {
        let src = single(Rgba::new(0, 128, 255, 1));
        let out = pixel(&gamma(&src, 2.0).unwrap());
        // (128/255)^2 * 255 = 64.25
        assert_eq!(out, Rgba::new(0, 64, 255, 1));
        let out = pixel(&gamma(&src, 0.5).unwrap());
        // sqrt(128/255) * 255 = 180.66
        assert_eq!(out, Rgba::new(0, 181, 255, 1));
    }

    #[test]
    fn test_gamma_rejects_non_positive() {
        let src = single(Rgba::BLACK);
        for g in [0.0, -1.8, f64::NAN] {
            match gamma(&src, g) {
                Err(FilterError::InvalidParameter { name, .. }) => assert_eq!(name, "gamma"),
                other => panic!("expected invalid gamma for {}, got {:?}", g, other),
            }
        }
    }

    #[test]
    fn test_contrast_rejects_non_finite() {
        let src = single(Rgba::new(128, 200, 0, 255));
        for factor in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            match contrast(&src, factor) {
                Err(FilterError::InvalidParameter { name, .. }) => assert_eq!(name, "factor"),
                other => panic!("expected invalid factor for {}, got {:?}", factor, other),
            }
        }
    }

    #[test]
    fn test_apply_lut() {
        let lut = Lut::from_fn(|c| c / 2);
        let out = apply_lut(&single(Rgba::new(200, 101, 0, 9)), &lut);
        assert_eq!(pixel(&out), Rgba::new(100, 50, 0, 9));
    }

    #[test]
    fn test_identity_parameters() {
        for c in 0..=255u8 {
            let src = single(Rgba::new(c, 255 - c, c / 3, c));
            assert_eq!(brightness(&src, 0), src);
            assert_eq!(contrast(&src, 1.0).unwrap(), src);
            assert_eq!(gamma(&src, 1.0).unwrap(), src);
        }
    }
}

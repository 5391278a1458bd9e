pub mod kernels;

use imagefilter_macros::simd_targets;

use crate::{
    error::{FilterError, Result},
    prelude::TextureTransform,
    texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice},
    transform::{
        Strategy,
        convolution::kernels::{
            BOX_BLUR, BOX_BLUR_SIZE, EDGE_DETECT, EDGE_DETECT_SIZE, EMBOSS, EMBOSS_SIZE, GAUSSIAN,
            GAUSSIAN_SIZE, SHARPEN, SHARPEN_SIZE,
        },
    },
    utils::{num::round_u8, pixel::Rgba},
};

/// Odd sized square matrix of weights, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self> {
        if size % 2 == 0 {
            return Err(FilterError::invalid(
                "kernel",
                format!("size must be odd, got {}", size),
            ));
        }
        if weights.len() != size * size {
            return Err(FilterError::invalid(
                "kernel",
                format!(
                    "a {}x{} kernel needs {} weights, got {}",
                    size,
                    size,
                    size * size,
                    weights.len()
                ),
            ));
        }
        Ok(Self { size, weights })
    }

    /// Build from nested rows, every row must have as many entries as there are rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != size) {
            return Err(FilterError::invalid(
                "kernel",
                format!(
                    "kernel must be square, found a row of {} in a {} row kernel",
                    row.as_ref().len(),
                    size
                ),
            ));
        }
        let weights = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();
        Self::new(size, weights)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to the kernel edge, `N / 2`.
    pub fn offset(&self) -> usize {
        self.size / 2
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.weights.chunks_exact(self.size)
    }
}

/// Named kernels shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPreset {
    BoxBlur,
    Gaussian,
    Sharpen,
    EdgeDetect,
    Emboss,
}

impl KernelPreset {
    pub const ALL: [KernelPreset; 5] = [
        KernelPreset::BoxBlur,
        KernelPreset::Gaussian,
        KernelPreset::Sharpen,
        KernelPreset::EdgeDetect,
        KernelPreset::Emboss,
    ];

    pub fn kernel(&self) -> Kernel {
        let (size, weights): (usize, &[f64]) = match self {
            KernelPreset::BoxBlur => (BOX_BLUR_SIZE, &BOX_BLUR),
            KernelPreset::Gaussian => (GAUSSIAN_SIZE, &GAUSSIAN),
            KernelPreset::Sharpen => (SHARPEN_SIZE, &SHARPEN),
            KernelPreset::EdgeDetect => (EDGE_DETECT_SIZE, &EDGE_DETECT),
            KernelPreset::Emboss => (EMBOSS_SIZE, &EMBOSS),
        };
        Kernel {
            size,
            weights: weights.to_vec(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KernelPreset::BoxBlur => "blur",
            KernelPreset::Gaussian => "gaussian",
            KernelPreset::Sharpen => "sharpen",
            KernelPreset::EdgeDetect => "edge_detect",
            KernelPreset::Emboss => "emboss",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }
}

impl From<KernelPreset> for Kernel {
    fn from(value: KernelPreset) -> Self {
        value.kernel()
    }
}

/// Weighted neighbourhood sum over R, G, B.
///
/// Pixels closer than `offset` to any edge are copied from the source, the
/// kernel never reads out of bounds. Alpha comes from the center pixel.
#[derive(Debug, Clone)]
pub struct Convolution {
    kernel: Kernel,
    strategy: Strategy,
}

impl Convolution {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            strategy: Strategy::Auto,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl TextureTransform for Convolution {
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
        let kernel = &self.kernel;
        self.strategy
            .resolve(shape)
            .for_each_row(output.as_mut(), shape.0, |y, out_row| {
                convolve_row(in_buf, shape, y, kernel.size, &kernel.weights, out_row);
            });
        (input, output)
    }

    fn prepare(&mut self, _: Shape, _: Shape) {}
}

#[simd_targets]
fn convolve_row(
    in_buf: &[Rgba],
    shape: Shape,
    y: usize,
    size: usize,
    weights: &[f64],
    out_row: &mut [Rgba],
) {
    let (width, height) = shape;
    let offset = size / 2;
    let row_start = y * width;
    let in_row = &in_buf[row_start..row_start + width];

    if y < offset || y + offset >= height {
        out_row.copy_from_slice(in_row);
        return;
    }

    for (x, dst) in out_row.iter_mut().enumerate() {
        let center = in_row[x];
        if x < offset || x + offset >= width {
            *dst = center;
            continue;
        }

        let (mut r, mut g, mut b) = (0.0_f64, 0.0_f64, 0.0_f64);
        for (ky, k_row) in weights.chunks_exact(size).enumerate() {
            let window_start = (y + ky - offset) * width + x - offset;
            let window = &in_buf[window_start..window_start + size];
            for (pixel, k) in window.iter().zip(k_row.iter()) {
                r += pixel.r as f64 * k;
                g += pixel.g as f64 * k;
                b += pixel.b as f64 * k;
            }
        }
        *dst = Rgba::new(round_u8(r), round_u8(g), round_u8(b), center.a);
    }
}

pub fn convolve(texture: &Texture<Rgba>, kernel: &Kernel) -> Texture<Rgba> {
    Convolution::new(kernel.clone()).process(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(2, vec![0.25; 4]).is_err());
        assert!(Kernel::new(0, vec![]).is_err());
        assert!(Kernel::new(3, vec![1.0; 8]).is_err());
        assert!(Kernel::new(1, vec![1.0]).is_ok());
        assert!(Kernel::from_rows(&[vec![1.0, 0.0], vec![0.0]]).is_err());

        let kernel = Kernel::from_rows(&[[0.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 0.0]]).unwrap();
        assert_eq!(kernel.size(), 3);
        assert_eq!(kernel.offset(), 1);
        assert_eq!(kernel.weights()[4], 2.0);
    }

    #[test]
    fn test_presets() {
        for preset in KernelPreset::ALL {
            let kernel = preset.kernel();
            assert_eq!(kernel.size(), 3);
            assert_eq!(KernelPreset::from_name(preset.name()), Some(preset));
        }
        let sum = |p: KernelPreset| p.kernel().weights().iter().sum::<f64>();
        assert!((sum(KernelPreset::BoxBlur) - 1.0).abs() < 1e-12);
        assert_eq!(sum(KernelPreset::Gaussian), 1.0);
        assert_eq!(sum(KernelPreset::Sharpen), 1.0);
        assert_eq!(sum(KernelPreset::EdgeDetect), 0.0);
        assert_eq!(sum(KernelPreset::Emboss), 1.0);
        assert_eq!(KernelPreset::from_name("nope"), None);
    }

    #[test]
    fn test_single_bright_pixel_edge_detect() {
        let mut src = Texture::filled(5, 5, Rgba::new(0, 0, 0, 200));
        src.set(2, 2, Rgba::new(10, 10, 10, 100));
        let out = convolve(&src, &KernelPreset::EdgeDetect.kernel());

        assert_eq!(out.get(2, 2), Some(&Rgba::new(80, 80, 80, 100)));
        // neighbours see -10, clamped
        assert_eq!(out.get(1, 1), Some(&Rgba::new(0, 0, 0, 200)));
        assert_eq!(out.get(0, 0), Some(&Rgba::new(0, 0, 0, 200)));
    }

    #[test]
    fn test_kernel_larger_than_image_copies_everything() {
        let src = Texture::from_vec(
            2,
            2,
            vec![
                Rgba::new(1, 2, 3, 4),
                Rgba::new(5, 6, 7, 8),
                Rgba::new(9, 10, 11, 12),
                Rgba::new(13, 14, 15, 16),
            ],
        )
        .unwrap();
        let out = convolve(&src, &KernelPreset::Sharpen.kernel());
        assert_eq!(out, src);
    }

    #[test]
    fn test_uniform_image_box_blur() {
        for c in [0u8, 1, 77, 128, 254, 255] {
            let src = Texture::filled(6, 4, Rgba::new(c, c, c, 3));
            assert_eq!(convolve(&src, &KernelPreset::BoxBlur.kernel()), src);
            assert_eq!(convolve(&src, &KernelPreset::Gaussian.kernel()), src);
        }
    }
}

use image::DynamicImage;

use crate::{config::ProcessConfig, error::Result, texture::Texture, utils::pixel::Rgba};

pub mod color_palette;
pub mod config;
pub mod dithering;
pub mod error;
pub mod filter;
pub mod texture;
pub mod tone_curve;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        error::{FilterError, Result},
        filter::Filter,
        texture::prelude::*,
        tone_curve::{ControlPoint, Lut, ToneCurve},
        transform::prelude::*,
        utils::prelude::*,
    };
}

// one entry point per operator, each returns a fresh texture
pub use crate::{
    dithering::{luma_chroma::luma_chroma_dither, ordered::ordered_dither},
    transform::{
        convolution::convolve,
        grayscale::grayscale,
        morphology::{dilate, erode},
        point::{apply_lut, brightness, contrast, gamma, invert},
        quantize::quantize_popularity,
    },
};

/// Run every filter of `config` on `original_img`, in order.
pub fn run(config: &ProcessConfig, original_img: &DynamicImage) -> Result<DynamicImage> {
    let texture: Texture<Rgba> = original_img.into();
    let output = filter::apply_all(&texture, &config.filters)?;
    Ok(output.into())
}

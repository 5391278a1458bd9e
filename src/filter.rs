//! The catalogue of operators as plain values.
//!
//! A [Filter] carries its parameters so it can be listed in a configuration,
//! named on the command line and applied later to any texture.

use std::fmt::Display;

use crate::{
    dithering::{luma_chroma::LumaChromaDither, ordered::OrderedDither},
    error::{FilterError, Result},
    prelude::TextureTransform,
    texture::{Texture, TextureRef},
    tone_curve::ToneCurve,
    transform::{
        convolution::{Convolution, Kernel, KernelPreset},
        grayscale::Grayscale,
        morphology::Morphology,
        point::PointTransform,
        quantize::PopularityQuantization,
    },
    utils::pixel::Rgba,
};

pub const DEFAULT_BRIGHTNESS: i32 = 30;
pub const DEFAULT_CONTRAST: f64 = 1.5;
pub const DEFAULT_GAMMA: f64 = 1.8;
pub const DEFAULT_MAP_SIZE: usize = 2;
pub const DEFAULT_LEVELS: usize = 2;
pub const DEFAULT_NUM_COLORS: usize = 16;

/// Kernel of a [Filter::Convolve], either a named preset or explicit weights.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvolveKernel {
    Preset(KernelPreset),
    Custom(Kernel),
}

impl ConvolveKernel {
    pub fn kernel(&self) -> Kernel {
        match self {
            ConvolveKernel::Preset(preset) => preset.kernel(),
            ConvolveKernel::Custom(kernel) => kernel.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Invert,
    Brightness { factor: i32 },
    Contrast { factor: f64 },
    Gamma { gamma: f64 },
    ToneCurve { curve: ToneCurve },
    Convolve { kernel: ConvolveKernel },
    Dilate,
    Erode,
    Grayscale,
    Quantize { num_colors: usize },
    OrderedDither { map_size: usize, levels: usize },
    LumaChromaDither,
}

impl Filter {
    /// Every name accepted by [Filter::from_name].
    pub const NAMES: [&'static str; 16] = [
        "invert",
        "brightness",
        "contrast",
        "gamma",
        "tone_curve",
        "blur",
        "gaussian",
        "sharpen",
        "edge_detect",
        "emboss",
        "dilate",
        "erode",
        "grayscale",
        "quantize",
        "ordered_dither",
        "luma_chroma_dither",
    ];

    /// Filter with its default parameters, kernel presets are looked up by
    /// their own name.
    pub fn from_name(name: &str) -> Option<Self> {
        let filter = match name {
            "invert" => Filter::Invert,
            "brightness" => Filter::Brightness {
                factor: DEFAULT_BRIGHTNESS,
            },
            "contrast" => Filter::Contrast {
                factor: DEFAULT_CONTRAST,
            },
            "gamma" => Filter::Gamma {
                gamma: DEFAULT_GAMMA,
            },
            "tone_curve" => Filter::ToneCurve {
                curve: ToneCurve::identity(),
            },
            "dilate" => Filter::Dilate,
            "erode" => Filter::Erode,
            "grayscale" => Filter::Grayscale,
            "quantize" => Filter::Quantize {
                num_colors: DEFAULT_NUM_COLORS,
            },
            "ordered_dither" => Filter::OrderedDither {
                map_size: DEFAULT_MAP_SIZE,
                levels: DEFAULT_LEVELS,
            },
            "luma_chroma_dither" => Filter::LumaChromaDither,
            other => Filter::Convolve {
                kernel: ConvolveKernel::Preset(KernelPreset::from_name(other)?),
            },
        };
        Some(filter)
    }

    /// Same as [Filter::from_name], unknown names are a config error.
    pub fn parse_name(name: &str) -> Result<Self> {
        Filter::from_name(name).ok_or_else(|| {
            FilterError::config(format!(
                "unknown filter `{}`, expected one of: {}",
                name,
                Filter::NAMES.join(", ")
            ))
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Brightness { .. } => "brightness",
            Filter::Contrast { .. } => "contrast",
            Filter::Gamma { .. } => "gamma",
            Filter::ToneCurve { .. } => "tone_curve",
            Filter::Convolve { .. } => "convolve",
            Filter::Dilate => "dilate",
            Filter::Erode => "erode",
            Filter::Grayscale => "grayscale",
            Filter::Quantize { .. } => "quantize",
            Filter::OrderedDither { .. } => "ordered_dither",
            Filter::LumaChromaDither => "luma_chroma_dither",
        }
    }

    /// Check the parameters without touching any image.
    pub fn validate(&self) -> Result {
        match self {
            Filter::Contrast { factor } => PointTransform::contrast(*factor).map(drop),
            Filter::Gamma { gamma } => PointTransform::gamma(*gamma).map(drop),
            Filter::Quantize { num_colors } => PopularityQuantization::new(*num_colors).map(drop),
            Filter::OrderedDither { map_size, levels } => {
                OrderedDither::new(*map_size, *levels).map(drop)
            }
            _ => Ok(()),
        }
    }

    /// Run the filter, returning a new texture of the same shape.
    ///
    /// Parameters are validated before any pixel is read.
    pub fn apply(&self, texture: &Texture<Rgba>) -> Result<Texture<Rgba>> {
        tracing::debug!(
            filter = %self,
            width = texture.width(),
            height = texture.height(),
            "applying filter"
        );
        let output = match self {
            Filter::Invert => PointTransform::invert().process(texture),
            Filter::Brightness { factor } => PointTransform::brightness(*factor).process(texture),
            Filter::Contrast { factor } => PointTransform::contrast(*factor)?.process(texture),
            Filter::Gamma { gamma } => PointTransform::gamma(*gamma)?.process(texture),
            Filter::ToneCurve { curve } => PointTransform::lut(curve.lut()).process(texture),
            Filter::Convolve { kernel } => Convolution::new(kernel.kernel()).process(texture),
            Filter::Dilate => Morphology::dilate().process(texture),
            Filter::Erode => Morphology::erode().process(texture),
            Filter::Grayscale => Grayscale::default().process(texture),
            Filter::Quantize { num_colors } => {
                PopularityQuantization::new(*num_colors)?.process(texture)
            }
            Filter::OrderedDither { map_size, levels } => {
                OrderedDither::new(*map_size, *levels)?.process(texture)
            }
            Filter::LumaChromaDither => LumaChromaDither::new()?.process(texture),
        };
        Ok(output)
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Brightness { factor } => write!(f, "brightness({})", factor),
            Filter::Contrast { factor } => write!(f, "contrast({})", factor),
            Filter::Gamma { gamma } => write!(f, "gamma({})", gamma),
            Filter::ToneCurve { curve } => write!(f, "tone_curve({} points)", curve.points().len()),
            Filter::Convolve {
                kernel: ConvolveKernel::Preset(preset),
            } => write!(f, "convolve({})", preset.name()),
            Filter::Convolve {
                kernel: ConvolveKernel::Custom(kernel),
            } => write!(f, "convolve({0}x{0})", kernel.size()),
            Filter::Quantize { num_colors } => write!(f, "quantize({})", num_colors),
            Filter::OrderedDither { map_size, levels } => {
                write!(f, "ordered_dither({}, {})", map_size, levels)
            }
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Apply `filters` in order, each one consuming the previous output.
pub fn apply_all(texture: &Texture<Rgba>, filters: &[Filter]) -> Result<Texture<Rgba>> {
    let mut current = texture.clone();
    for filter in filters {
        current = filter.apply(&current)?;
    }
    Ok(current)
}

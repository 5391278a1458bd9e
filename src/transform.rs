pub mod convolution;
pub mod grayscale;
pub mod morphology;
pub mod pipe;
pub mod point;
pub mod quantize;
pub mod strategy;
pub mod traits;

pub use strategy::Strategy;

pub mod prelude {
    pub use super::{
        Strategy,
        convolution::{Convolution, Kernel, KernelPreset},
        grayscale::Grayscale,
        morphology::{MorphOp, Morphology},
        pipe::{PipeableTransform, Pipeline},
        point::PointTransform,
        quantize::PopularityQuantization,
        traits::TextureTransform,
    };
}

use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::{
    error::{FilterError, Result},
    texture::Texture,
    utils::pixel::Rgba,
};

/// Exact RGB triple -> number of pixels carrying it. Alpha is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorFrequency {
    counts: HashMap<[u8; 3], usize>,
}

impl ColorFrequency {
    pub fn from_texture(texture: &Texture<Rgba>) -> Self {
        Self::from_buffer(texture.as_ref())
    }

    pub fn from_buffer(pixels: &[Rgba]) -> Self {
        let mut counts = HashMap::new();
        for pixel in pixels {
            *counts.entry(pixel.rgb()).or_insert(0usize) += 1;
        }
        Self { counts }
    }

    /// Number of distinct colours.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Every colour of the table, in no particular order.
    pub fn colors(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.counts.keys().copied()
    }

    pub fn count(&self, rgb: [u8; 3]) -> usize {
        self.counts.get(&rgb).copied().unwrap_or(0)
    }

    /// Colours by descending count, ties by ascending `(r, g, b)`.
    pub fn ranked(&self) -> Vec<([u8; 3], usize)> {
        self.counts
            .iter()
            .map(|(rgb, count)| (*rgb, *count))
            .sorted_by(|(rgb_a, count_a), (rgb_b, count_b)| {
                count_b.cmp(count_a).then_with(|| rgb_a.cmp(rgb_b))
            })
            .collect_vec()
    }
}

/// Ordered list of representative colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Build from explicit colours, kept in the given order.
    pub fn new(colors: Vec<[u8; 3]>) -> Result<Self> {
        if colors.is_empty() {
            return Err(FilterError::invalid("palette", "needs at least one colour"));
        }
        Ok(Self { colors })
    }

    /// The `num_colors` most frequent colours of `frequency`.
    ///
    /// Fewer colours are kept when the image has less distinct ones; an empty
    /// table gives an empty palette.
    pub fn popularity(frequency: &ColorFrequency, num_colors: usize) -> Result<Self> {
        if num_colors == 0 {
            return Err(FilterError::invalid(
                "num_colors",
                "must be at least 1, got 0",
            ));
        }
        Ok(Self::most_frequent(frequency, num_colors))
    }

    pub(crate) fn most_frequent(frequency: &ColorFrequency, num_colors: usize) -> Self {
        let colors = frequency
            .ranked()
            .into_iter()
            .take(num_colors)
            .map(|(rgb, _)| rgb)
            .collect_vec();

        debug!(
            distinct = frequency.distinct(),
            requested = num_colors,
            kept = colors.len(),
            "built popularity palette"
        );
        Self { colors }
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Closest palette colour by squared RGB distance. The earliest entry wins
    /// ties. `None` only for an empty palette.
    pub fn nearest(&self, rgb: [u8; 3]) -> Option<[u8; 3]> {
        let target = Rgba::from_rgb(rgb, 0);
        let mut best: Option<([u8; 3], u32)> = None;
        for color in &self.colors {
            let distance = target.distance_squared(Rgba::from_rgb(*color, 0));
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((*color, distance)),
            }
        }
        best.map(|(color, _)| color)
    }
}

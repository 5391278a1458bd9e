use rand::Rng;

use crate::{texture::Texture, utils::pixel::Rgba};

pub fn rand_rgba(rng: &mut rand::rngs::ThreadRng) -> Rgba {
    Rgba::new(
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
    )
}

pub fn gen_random_texture(width: u32, height: u32) -> Texture<Rgba> {
    let mut rng = rand::rng();
    let buffer = (0..width as usize * height as usize)
        .map(|_| rand_rgba(&mut rng))
        .collect();
    Texture::from_vec(width, height, buffer).unwrap()
}

/// Random image drawn from a handful of colours, for palette tests.
pub fn gen_few_colors_texture(width: u32, height: u32, colors: usize) -> Texture<Rgba> {
    let mut rng = rand::rng();
    let palette: Vec<Rgba> = (0..colors).map(|_| rand_rgba(&mut rng)).collect();
    let buffer = (0..width as usize * height as usize)
        .map(|_| palette[rng.random_range(0..colors)])
        .collect();
    Texture::from_vec(width, height, buffer).unwrap()
}

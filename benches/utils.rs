use imagefilter::{
    prelude::{Strategy, TextureTransform},
    texture::Texture,
    utils::pixel::Rgba,
};
use rand::Rng;

pub const BENCH_IMAGE_SIZES: [u32; 3] = [100, 300, 900];

pub fn rand_rgba(rng: &mut rand::rngs::ThreadRng) -> Rgba {
    Rgba::new(
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
    )
}

/// Random square texture and an output buffer of the same shape.
pub fn texture_data(size: u32) -> (Texture<Rgba>, Texture<Rgba>) {
    let mut rng = rand::rng();
    let buffer = (0..size as usize * size as usize)
        .map(|_| rand_rgba(&mut rng))
        .collect();
    (
        std::hint::black_box(Texture::from_vec(size, size, buffer).unwrap()),
        std::hint::black_box(Texture::new(size, size)),
    )
}

pub const STRATEGIES: [Strategy; 2] = [Strategy::Seq, Strategy::Par];

/// Bench `transform` on every image size, reusing the output buffer.
pub fn bench_transform<T>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    mut transform: T,
) where
    T: TextureTransform<Input = Rgba, Output = Rgba>,
{
    for size in BENCH_IMAGE_SIZES {
        let (input, mut output) = texture_data(size);
        transform.prepare(
            (size as usize, size as usize),
            (size as usize, size as usize),
        );
        group.bench_with_input(criterion::BenchmarkId::new(name, size), &size, |b, _| {
            b.iter(|| {
                let res =
                    transform.apply(input.as_texture_slice(), output.as_texture_mut_slice());
                std::hint::black_box(res);
            });
        });
    }
}

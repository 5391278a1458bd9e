#[cfg(test)]
mod strategy_tests {
    use crate::{
        dithering::{luma_chroma::LumaChromaDither, ordered::OrderedDither},
        tests::utils::*,
        texture::Texture,
        transform::prelude::*,
        utils::pixel::Rgba,
    };

    /// Test image size, wide enough for `Strategy::Auto` to pick rayon
    const WIDTH: u32 = 480;
    const HEIGHT: u32 = 430;

    /// Run the same transform with every strategy and compare the results.
    fn assert_strategies_match<T, F>(name: &str, build: F)
    where
        T: TextureTransform<Input = Rgba, Output = Rgba>,
        F: Fn(Strategy) -> T,
    {
        let input = gen_random_texture(WIDTH, HEIGHT);
        let seq = build(Strategy::Seq).process(&input);
        let par = build(Strategy::Par).process(&input);
        let auto = build(Strategy::Auto).process(&input);
        assert!(seq == par, "{}: seq and par differ", name);
        assert!(seq == auto, "{}: seq and auto differ", name);
    }

    #[test]
    fn test_auto_picks_par_for_large_images() {
        if rayon::current_num_threads() > 1 {
            assert_eq!(
                Strategy::auto((WIDTH as usize, HEIGHT as usize)),
                Strategy::Par
            );
        }
    }

    #[test]
    fn test_point_strategies_match() {
        assert_strategies_match("gamma", |s| {
            PointTransform::gamma(0.7).unwrap().with_strategy(s)
        });
        assert_strategies_match("contrast", |s| {
            PointTransform::contrast(2.5).unwrap().with_strategy(s)
        });
    }

    #[test]
    fn test_neighbourhood_strategies_match() {
        assert_strategies_match("sharpen", |s| {
            Convolution::new(KernelPreset::Sharpen.kernel()).with_strategy(s)
        });
        assert_strategies_match("dilate", |s| Morphology::dilate().with_strategy(s));
        assert_strategies_match("erode", |s| Morphology::erode().with_strategy(s));
    }

    #[test]
    fn test_color_reduction_strategies_match() {
        assert_strategies_match("grayscale", Grayscale::new);
        assert_strategies_match("quantize", |s| {
            PopularityQuantization::new(8).unwrap().with_strategy(s)
        });
        assert_strategies_match("ordered", |s| {
            OrderedDither::new(5, 3).unwrap().with_strategy(s)
        });
        assert_strategies_match("luma_chroma", |s| {
            LumaChromaDither::new().unwrap().with_strategy(s)
        });
    }

    #[test]
    fn test_pipeline_matches_sequential_calls() {
        let input = gen_random_texture(64, 48);

        let mut pipeline = Grayscale::default()
            .pipe(Convolution::new(KernelPreset::Gaussian.kernel()))
            .pipe(OrderedDither::new(4, 2).unwrap());
        let piped = pipeline.process(&input);

        let step = crate::grayscale(&input);
        let step = crate::convolve(&step, &KernelPreset::Gaussian.kernel());
        let step = crate::ordered_dither(&step, 4, 2).unwrap();
        assert_eq!(piped, step);

        // reused with a new shape
        let other = gen_random_texture(10, 3);
        let piped: Texture<Rgba> = pipeline.process(&other);
        assert_eq!(piped, crate::ordered_dither(
            &crate::convolve(&crate::grayscale(&other), &KernelPreset::Gaussian.kernel()),
            4,
            2,
        )
        .unwrap());
    }
}

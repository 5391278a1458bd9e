use criterion::{Criterion, criterion_group, criterion_main};
use imagefilter::prelude::{Convolution, Kernel, KernelPreset, Morphology};

pub(crate) mod utils;
use utils::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution_transform");

    for strategy in STRATEGIES {
        bench_transform(
            &mut group,
            &format!("gaussian-{}", strategy),
            Convolution::new(KernelPreset::Gaussian.kernel()).with_strategy(strategy),
        );
        bench_transform(
            &mut group,
            &format!("dilate-{}", strategy),
            Morphology::dilate().with_strategy(strategy),
        );
    }

    // kernel size drives the cost, N² reads per pixel
    for size in [5usize, 9] {
        let kernel = Kernel::new(size, vec![1.0 / (size * size) as f64; size * size]).unwrap();
        bench_transform(&mut group, &format!("box-{}x{}", size, size), Convolution::new(kernel));
    }

    group.finish();
}

criterion_group!(convolution_transform, criterion_benchmark);
criterion_main!(convolution_transform);

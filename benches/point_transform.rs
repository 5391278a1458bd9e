use criterion::{Criterion, criterion_group, criterion_main};
use imagefilter::{prelude::PointTransform, tone_curve::ToneCurve};

pub(crate) mod utils;
use utils::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_transform");

    for strategy in STRATEGIES {
        bench_transform(
            &mut group,
            &format!("invert-{}", strategy),
            PointTransform::invert().with_strategy(strategy),
        );
        bench_transform(
            &mut group,
            &format!("gamma-{}", strategy),
            PointTransform::gamma(1.8).unwrap().with_strategy(strategy),
        );
    }

    let curve = ToneCurve::new([(0.0, 0.0), (64.0, 20.0), (190.0, 240.0), (255.0, 255.0)]).unwrap();
    bench_transform(&mut group, "tone-curve", PointTransform::lut(curve.lut()));

    group.finish();
}

criterion_group!(point_transform, criterion_benchmark);
criterion_main!(point_transform);

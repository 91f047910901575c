use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use shock_image::{FloatImage, ImageSize};
use shock_imgproc::filter::gaussian_blur;
use shock_imgproc::{ImprovedShockFilter, SimpleShockFilter};

fn test_image(size: ImageSize) -> FloatImage {
    let mut img = FloatImage::from_size_val(size, 3, 0.0).unwrap();
    for y in 0..size.height {
        for x in 0..size.width {
            let v = ((x / 8 + y / 8) % 2) as f32 * 0.8 + 0.1;
            for c in 0..3 {
                img.set(x, y, c, v);
            }
        }
    }
    img
}

fn bench_shock(c: &mut Criterion) {
    let size = ImageSize {
        width: 128,
        height: 128,
    };
    let img = test_image(size);

    let mut group = c.benchmark_group("shock");

    group.bench_function("gaussian_blur", |b| {
        b.iter(|| gaussian_blur(black_box(&img), 2.0).unwrap())
    });

    let simple = SimpleShockFilter::new(2.0, 3);
    group.bench_function("simple_shock", |b| {
        b.iter(|| simple.apply(black_box(&img)).unwrap())
    });

    let improved = ImprovedShockFilter::new(2.0, 5.0, 0.2, 3, 0.0);
    group.bench_function("improved_shock", |b| {
        b.iter(|| improved.apply(black_box(&img)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_shock);
criterion_main!(benches);

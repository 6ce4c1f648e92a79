use ac_core::{Image, Point2d};
use ac_field::ImageField;
use ac_snake::{Contour, SnakeConfig, SnakeParams, SnakeSolver, StiffnessOperator};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn disk_u8(width: usize, height: usize, cx: f64, cy: f64, r: f64) -> Image<u8> {
    Image::from_fn(width, height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        if dx * dx + dy * dy <= r * r { 255 } else { 0 }
    })
}

fn bench_invert(c: &mut Criterion) {
    let params = SnakeParams::default();
    for n in [63usize, 256] {
        let op = StiffnessOperator::new(n, &params).expect("valid operator");
        c.bench_function(&format!("stiffness_invert_n{n}"), |b| {
            b.iter(|| black_box(op.invert().expect("invertible")));
        });
    }
}

fn bench_run(c: &mut Criterion) {
    let img = disk_u8(240, 280, 120.0, 140.0, 55.0);
    let field = ImageField::build(&img.as_view(), 30.0).expect("valid field");
    let cfg = SnakeConfig::default();
    let start = Contour::ellipse(Point2d::new(120.0, 140.0), 50.0, 60.0, 63).expect("valid contour");
    let mut solver = SnakeSolver::new(&field, start.len(), &cfg).expect("valid solver");

    c.bench_function("snake_run_50_n63", |b| {
        b.iter(|| {
            let mut contour = start.clone();
            solver.run(black_box(&mut contour)).expect("stays inside");
            black_box(contour.len());
        });
    });
}

criterion_group!(benches, bench_invert, bench_run);
criterion_main!(benches);

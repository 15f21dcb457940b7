use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use starlit::starfield::{
    Canvas, Color, DisplayList, Paint, Point, Starfield, StarfieldConfig, Viewport,
};
use starlit::{FrameTime, SeededRandom};

// Frames simulated per benchmark iteration, about one second at 120 Hz.
const FRAMES: usize = 120;

/// A canvas that drops every command, so only the simulation is measured.
struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self) {}

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: Paint, alpha: f64) {
        black_box((origin, width, height, paint, alpha));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint, alpha: f64) {
        black_box((center, radius, paint, alpha));
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64) {
        black_box((from, to, width, color, alpha));
    }
}

fn field(star_count: usize) -> Starfield<SeededRandom> {
    Starfield::new(
        Viewport::new(1920.0, 1080.0, 2.0),
        StarfieldConfig {
            star_count,
            ..StarfieldConfig::default()
        },
        SeededRandom::new(42),
    )
}

/// Simulation only: flicker, shooting stars and the focus animation.
fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    group.throughput(Throughput::Elements(FRAMES as u64));

    for stars in [180, 1_000] {
        group.bench_with_input(BenchmarkId::new("stars", stars), &stars, |b, &stars| {
            b.iter(|| {
                let mut field = field(stars);
                for i in 0..FRAMES {
                    let time = FrameTime {
                        dt: 1.0 / 120.0,
                        t: i as f64 / 120.0,
                    };
                    black_box(field.advance(time));
                }
            });
        });
    }

    group.finish();
}

/// Full frames painted into a discarding canvas.
fn bench_frame_null_canvas(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame/null");
    group.throughput(Throughput::Elements(FRAMES as u64));

    group.bench_function(format!("elems/{FRAMES}"), |b| {
        b.iter(|| {
            let mut field = field(180);
            let mut canvas = NullCanvas;
            for i in 0..FRAMES {
                black_box(field.frame(i as f64 * 8.333, &mut canvas));
            }
        });
    });

    group.finish();
}

/// Full frames recorded into a reused display list.
fn bench_frame_display_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame/display_list");
    group.throughput(Throughput::Elements(FRAMES as u64));

    group.bench_function(format!("elems/{FRAMES}"), |b| {
        b.iter(|| {
            let mut field = field(180);
            let mut canvas = DisplayList::new();
            for i in 0..FRAMES {
                canvas.reset();
                field.frame(i as f64 * 8.333, &mut canvas);
                black_box(canvas.len());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_advance,
    bench_frame_null_canvas,
    bench_frame_display_list
);
criterion_main!(benches);

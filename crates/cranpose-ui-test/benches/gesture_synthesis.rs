use cranpose_ui_test::prelude::*;
use cranpose_ui_test::synth::swipe_times;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ROOT_WIDTH: u32 = 1080;
const ROOT_HEIGHT: u32 = 1920;
const SWIPE_DURATION_SAMPLES: &[i64] = &[200, 1_000, 5_000];
const POINTER_COUNT_SAMPLES: &[usize] = &[2, 5, 10];

fn headless_rule() -> InputTestRule<RecordingSink, NodeTransform> {
    let size = Size::new(ROOT_WIDTH as f32, ROOT_HEIGHT as f32);
    let recorder = RecordingSink::new();
    let rule = InputTestRule::new(
        InjectionConfig::for_root_size(size),
        recorder,
        NodeTransform::covering(size),
    );
    match rule {
        Ok(rule) => rule,
        Err(error) => panic!("invalid bench config: {error}"),
    }
}

fn bench_swipe_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_swipe_times");
    for &duration in SWIPE_DURATION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("duration_millis", duration),
            &duration,
            |b, &duration| {
                let key_times = [duration / 4, duration / 2, duration * 3 / 4];
                b.iter(|| {
                    let times = swipe_times(black_box(duration), &key_times, 16);
                    black_box(times)
                });
            },
        );
    }
    group.finish();
}

fn bench_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_swipe");
    for &duration in SWIPE_DURATION_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("duration_millis", duration),
            &duration,
            |b, &duration| {
                let mut rule = headless_rule();
                b.iter(|| {
                    rule.perform_touch_input(|touch| {
                        let (start, end) = (touch.top_center(), touch.bottom_center());
                        touch.swipe(start, end, duration)
                    })
                    .ok();
                    rule.sink().clear();
                });
            },
        );
    }
    group.finish();
}

fn bench_multi_touch_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_multi_touch_swipe");
    for &pointers in POINTER_COUNT_SAMPLES {
        group.bench_with_input(
            BenchmarkId::new("pointers", pointers),
            &pointers,
            |b, &pointers| {
                let mut rule = headless_rule();
                let curves: Vec<Box<dyn Fn(i64) -> Point>> = (0..pointers)
                    .map(|index| {
                        let x = 50.0 + index as f32 * 100.0;
                        Box::new(move |time: i64| Point::new(x, 100.0 + time as f32))
                            as Box<dyn Fn(i64) -> Point>
                    })
                    .collect();
                let curve_refs: Vec<&dyn Fn(i64) -> Point> =
                    curves.iter().map(|curve| curve.as_ref()).collect();
                b.iter(|| {
                    rule.perform_touch_input(|touch| {
                        touch.multi_touch_swipe(&curve_refs, 400, &[])
                    })
                    .ok();
                    rule.sink().clear();
                });
            },
        );
    }
    group.finish();
}

fn bench_velocity_swipe(c: &mut Criterion) {
    c.bench_function("gesture_velocity_swipe", |b| {
        let mut rule = headless_rule();
        b.iter(|| {
            rule.perform_touch_input(|touch| {
                touch.swipe_with_velocity(
                    Point::new(540.0, 1500.0),
                    Point::new(540.0, 300.0),
                    black_box(4_000.0),
                    None,
                )
            })
            .ok();
            rule.sink().clear();
        });
    });
}

criterion_group!(
    gesture_synthesis,
    bench_swipe_times,
    bench_swipe,
    bench_multi_touch_swipe,
    bench_velocity_swipe
);
criterion_main!(gesture_synthesis);

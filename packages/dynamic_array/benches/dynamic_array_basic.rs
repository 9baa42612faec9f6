//! Basic benchmarks for the `dynamic_array` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use dynamic_array::DynamicArray;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("dynamic_array_basic");

    let allocs_op = allocs.operation("new_empty");
    group.bench_function("new_empty", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(DynamicArray::<TestItem>::new()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("push_back_one");
    group.bench_function("push_back_one", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(DynamicArray::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                array.push_back(black_box(TEST_VALUE));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("read_one");
    group.bench_function("read_one", |b| {
        b.iter_custom(|iters| {
            let mut array = DynamicArray::new();
            array.push_back(TEST_VALUE);

            let position = array.begin();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(array[black_box(position)]);
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_front_one");
    group.bench_function("insert_front_one", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(|| {
                let mut array = DynamicArray::with_capacity(16);
                array.resize(8);
                array
            })
            .take(usize::try_from(iters).unwrap())
            .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                _ = black_box(array.insert(array.begin(), black_box(TEST_VALUE)));
            }

            start.elapsed()
        });
    });

    group.finish();

    let mut group = c.benchmark_group("dynamic_array_slow");

    let allocs_op = allocs.operation("push_back_10k");
    group.bench_function("push_back_10k", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(DynamicArray::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                for _ in 0..10_000 {
                    array.push_back(black_box(TEST_VALUE));
                }
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("reserve_then_push_back_10k");
    group.bench_function("reserve_then_push_back_10k", |b| {
        // With the capacity reserved up front, the only allocation is the reservation itself.
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(DynamicArray::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                array.reserve(10_000);

                for _ in 0..10_000 {
                    array.push_back(black_box(TEST_VALUE));
                }
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("forward_10_back_5_times_1000");
    group.bench_function("forward_10_back_5_times_1000", |b| {
        // We add 10 items, erase the first 5 and repeat this 1000 times.
        // This stresses the shifting of elements on erase.
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(DynamicArray::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                for _ in 0..1000 {
                    for _ in 0..10 {
                        array.push_back(black_box(TEST_VALUE));
                    }

                    for _ in 0..5 {
                        _ = black_box(array.erase(array.begin()));
                    }
                }
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("clone_10k");
    group.bench_function("clone_10k", |b| {
        b.iter_custom(|iters| {
            let source = DynamicArray::from_value(10_000, TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(source.clone()));
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}

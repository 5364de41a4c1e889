use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ward::{make_sref, Is};

fn bench_borrow_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("borrow_resolution/{}", ward::VARIANT));

    let held = Is::new(123_u64);
    let reference = held.borrow();
    group.bench_function("ref_with", |b| {
        b.iter(|| reference.with(|value| black_box(*value)))
    });

    let raw: *const u64 = held.get();
    group.bench_function("raw_deref", |b| {
        // SAFETY: `held` outlives the benchmark loop.
        b.iter(|| unsafe { black_box(*raw) })
    });

    let pointer = held.borrow_ptr();
    group.bench_function("ptr_resolve", |b| b.iter(|| black_box(pointer.is_null())));

    group.finish();
}

fn bench_shared_handles(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("shared_handles/{}", ward::VARIANT));

    let shared = make_sref(vec![1_u8; 64]);
    group.bench_function("sref_clone", |b| {
        b.iter(|| {
            let alias = shared.clone();
            black_box(alias.strong_count())
        })
    });

    group.bench_function("sref_downgrade_lock", |b| {
        b.iter(|| {
            let weak = shared.downgrade();
            black_box(weak.lock().is_null())
        })
    });

    group.finish();
}

fn bench_held_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("held_construction/{}", ward::VARIANT));

    group.bench_function("is_new_drop", |b| {
        b.iter(|| black_box(Is::new(black_box(7_u64))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_borrow_resolution,
    bench_shared_handles,
    bench_held_construction
);
criterion_main!(benches);

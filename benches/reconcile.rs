use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cleansite_rs::engine::order::{filter, reconcile, sort};
use cleansite_rs::models::{FilterOption, Service, SortKey};

fn build_services(size: usize) -> Vec<Service> {
    (1..=size as u64)
        .map(|id| Service {
            id,
            name: format!("Benchmark Service {}", id),
            home_short_description: format!("Short description {}", id),
            details_short_description: String::new(),
            description: String::new(),
            main_image: String::new(),
            detailed_images: if id % 3 == 0 {
                vec![format!("/images/{id}-a.jpg"), format!("/images/{id}-b.jpg")]
            } else {
                vec![]
            },
            image_details: vec![],
            features: vec![],
            created_at: None,
            updated_at: None,
        })
        .collect()
}

/// Saved order covering half the list in reverse, plus ids that no longer exist
fn build_saved_order(size: usize) -> Vec<u64> {
    let mut order: Vec<u64> = (1..=size as u64 / 2).rev().collect();
    order.extend((size as u64 + 1)..(size as u64 + 10));
    order
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for size in [10, 100, 1000] {
        let services = build_services(size);
        let saved = build_saved_order(size);

        group.bench_with_input(BenchmarkId::new("saved_order", size), &size, |b, _| {
            b.iter(|| reconcile(black_box(&services), black_box(Some(&saved))))
        });

        group.bench_with_input(BenchmarkId::new("no_saved_order", size), &size, |b, _| {
            b.iter(|| reconcile(black_box(&services), black_box(None)))
        });
    }

    group.finish();
}

fn bench_sort_and_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_and_filter");

    for size in [100, 1000] {
        let services = build_services(size);

        group.bench_with_input(BenchmarkId::new("sort_name_asc", size), &size, |b, _| {
            b.iter(|| sort(black_box(&services), SortKey::NameAsc))
        });

        group.bench_with_input(BenchmarkId::new("filter_search", size), &size, |b, _| {
            b.iter(|| filter(black_box(&services), FilterOption::WithImages, "service 1"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_sort_and_filter);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use modcat_core::merge_modules;
use modcat_schema::{CatalogRecord, LegacyRecord, ModuleDescriptor};

fn legacy_modules(n: usize) -> Vec<ModuleDescriptor> {
    (0..n)
        .map(|i| {
            let record = LegacyRecord {
                url: Some(format!("Module{i}.pkg")),
                title: Some(format!("Module {i}")),
                size: Some(1024),
                installedsize: Some(4096),
                ..LegacyRecord::default()
            };
            ModuleDescriptor::from_legacy_record(
                &format!("Module{i}"),
                &record,
                Some("https://host/base/"),
            )
        })
        .collect()
}

fn catalog_modules(n: usize, offset: usize) -> Vec<ModuleDescriptor> {
    (offset..offset + n)
        .map(|i| {
            let record = CatalogRecord {
                id: Some(format!("module{i}")),
                download_url: Some(format!("https://catalog/module{i}.pkg")),
                ..CatalogRecord::default()
            };
            ModuleDescriptor::from_catalog_record(&record)
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge_20_legacy_20_catalog_half_overlap", |b| {
        b.iter_with_setup(
            || (legacy_modules(20), catalog_modules(20, 10)),
            |(legacy, catalog)| merge_modules(legacy, catalog),
        );
    });
}

fn bench_merge_large(c: &mut Criterion) {
    c.bench_function("merge_500_legacy_500_catalog_disjoint", |b| {
        b.iter_with_setup(
            || (legacy_modules(500), catalog_modules(500, 500)),
            |(legacy, catalog)| merge_modules(legacy, catalog),
        );
    });
}

criterion_group!(benches, bench_merge, bench_merge_large);
criterion_main!(benches);

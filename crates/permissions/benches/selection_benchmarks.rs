use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use ehsrbac_catalog::{Catalog, CatalogMode};
use ehsrbac_permissions::{
    RolePermissions, create_default_permissions, is_globally_fully_selected, set_permission_value,
    toggle_global_permissions, toggle_module_permissions,
};

/// Copy-on-write single-leaf write versus a full deep copy of the tree.
fn bench_single_leaf_write(c: &mut Criterion) {
    let catalog = Catalog::ehs();
    let state = create_default_permissions(&catalog);

    let mut group = c.benchmark_group("single_leaf_write");
    group.bench_function("copy_on_write", |b| {
        b.iter(|| set_permission_value(black_box(&state), "event", "Safety Event", "create", true))
    });
    group.bench_function("deep_copy", |b| {
        b.iter(|| {
            let json = serde_json::to_value(black_box(&state)).unwrap_or_default();
            let copy: RolePermissions = serde_json::from_value(json).unwrap_or_default();
            copy.with("event", "Safety Event", "create", true)
        })
    });
    group.finish();
}

fn bench_toggles(c: &mut Criterion) {
    let catalog = Catalog::ehs();
    let state = create_default_permissions(&catalog);

    let mut group = c.benchmark_group("toggles");
    for mode in [CatalogMode::Simple, CatalogMode::Advanced] {
        group.bench_with_input(BenchmarkId::new("global", format!("{mode:?}")), &mode, |b, &mode| {
            b.iter(|| toggle_global_permissions(&catalog, black_box(&state), mode, true))
        });
    }
    group.bench_function("module_osha", |b| {
        b.iter(|| toggle_module_permissions(&catalog, black_box(&state), "osha", true))
    });
    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let catalog = Catalog::ehs();
    let full = toggle_global_permissions(&catalog, &RolePermissions::new(), CatalogMode::Advanced, true);

    c.bench_function("is_globally_fully_selected", |b| {
        b.iter(|| is_globally_fully_selected(&catalog, black_box(&full), CatalogMode::Advanced))
    });
}

criterion_group!(benches, bench_single_leaf_write, bench_toggles, bench_aggregation);
criterion_main!(benches);

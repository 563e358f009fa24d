use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use rolegate_auth::{Authorizer, InMemoryPermissionCache, Permission, Role, kebab_permission_name};

fn populated_cache(roles: usize, perms_per_role: usize) -> Arc<InMemoryPermissionCache> {
    let cache = InMemoryPermissionCache::new();
    for r in 0..roles {
        cache.grant(
            Role::new(format!("Role{r}")),
            (0..perms_per_role).map(|p| Permission::new(format!("read-resource{r}x{p}"))),
        );
    }
    Arc::new(cache)
}

fn bench_name_derivation(c: &mut Criterion) {
    c.bench_function("kebab_permission_name", |b| {
        b.iter(|| kebab_permission_name(black_box("Read"), black_box("PurchaseOrderLineItem")))
    });
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");

    for roles in [1usize, 4, 16] {
        let cache = populated_cache(roles, 32);
        let authz = Authorizer::builder(cache)
            .roles((0..roles).map(|r| format!("Role{r}")))
            .build();

        group.bench_with_input(BenchmarkId::new("granted", roles), &authz, |b, authz| {
            b.iter(|| authz.check(black_box("Read"), black_box("Resource0x0")))
        });
        group.bench_with_input(BenchmarkId::new("denied", roles), &authz, |b, authz| {
            b.iter(|| authz.check(black_box("Delete"), black_box("Resource0x0")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_name_derivation, bench_check);
criterion_main!(benches);

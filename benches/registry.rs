use capability_registry::{capability, Registry, RegistryApi};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use std::sync::Arc;

trait Module: Send + Sync {
    fn name(&self) -> &str;
}
capability!(dyn Module);

struct TestModule;

impl Module for TestModule {
    fn name(&self) -> &str {
        "test"
    }
}

fn bench_get(c: &mut Criterion) {
    let registry = Registry::new();
    registry.register::<dyn Module>(Arc::new(TestModule));

    c.bench_function("get registered", |b| {
        b.iter(|| black_box(registry.get::<dyn Module>()))
    });

    c.bench_function("require registered", |b| {
        b.iter(|| black_box(registry.require::<dyn Module>().name().len()))
    });
}

fn bench_get_after_register(c: &mut Criterion) {
    c.bench_function("queue 1000 callbacks then register", |b| {
        b.iter_batched(
            Registry::new,
            |registry| {
                for _ in 0..1000 {
                    registry.get_after_register::<dyn Module, _>(|module| {
                        black_box(module);
                    });
                }
                registry.register::<dyn Module>(Arc::new(TestModule));
                registry
            },
            BatchSize::SmallInput,
        )
    });

    let registry = Registry::new();
    registry.register::<dyn Module>(Arc::new(TestModule));

    c.bench_function("get_after_register immediate", |b| {
        b.iter(|| {
            registry.get_after_register::<dyn Module, _>(|module| {
                black_box(module);
            })
        })
    });
}

criterion_group!(benches, bench_get, bench_get_after_register);
criterion_main!(benches);

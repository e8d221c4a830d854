use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graft_di::{
    argument, Component, Container, ConstructorCatalog, ConstructorDescriptor, Parameter,
    Registration, SubtypeTable, TypeIdentity,
};
use std::sync::Arc;

struct Config {
    limit: usize,
}

struct Pool {
    config: Arc<Config>,
}

struct Service {
    pool: Arc<Pool>,
}

fn build_container() -> Container {
    let checker = Arc::new(SubtypeTable::new());
    let config_type = TypeIdentity::of::<Config>();
    let pool_type = TypeIdentity::of::<Pool>();
    let service_type = TypeIdentity::of::<Service>();

    let mut catalog = ConstructorCatalog::new();
    catalog.add(
        &pool_type,
        ConstructorDescriptor::new(
            vec![Parameter::named(config_type.clone(), "config")],
            |args| {
                Ok(Arc::new(Pool {
                    config: argument::<Config>(args, 0)?,
                }))
            },
        ),
    );
    catalog.add(
        &service_type,
        ConstructorDescriptor::new(
            vec![Parameter::named(pool_type.clone(), "pool")],
            |args| {
                Ok(Arc::new(Service {
                    pool: argument::<Pool>(args, 0)?,
                }))
            },
        ),
    );

    let mut container = Container::new(Arc::new(catalog));

    let mut config = Component::new(config_type.clone(), config_type, checker.clone()).unwrap();
    config.set_instance(Config { limit: 16 }).unwrap();
    container.register(Registration::new(config)).unwrap();

    let pool = Component::new(pool_type.clone(), pool_type, checker.clone()).unwrap();
    container.register(Registration::new(pool)).unwrap();

    let service = Component::new(service_type.clone(), service_type, checker).unwrap();
    container.register(Registration::new(service)).unwrap();

    container
}

fn bench_instance_hit(c: &mut Criterion) {
    let container = build_container();
    let config_type = TypeIdentity::of::<Config>();

    c.bench_function("instance_hit", |b| {
        b.iter(|| {
            let config = container.resolve_as::<Config>(&config_type).unwrap();
            black_box(config.limit);
        })
    });
}

fn bench_reflective_chain(c: &mut Criterion) {
    let container = build_container();
    let service_type = TypeIdentity::of::<Service>();

    c.bench_function("reflective_chain_depth_3", |b| {
        b.iter(|| {
            let service = container.resolve_as::<Service>(&service_type).unwrap();
            black_box(service.pool.config.limit);
        })
    });
}

criterion_group!(benches, bench_instance_hit, bench_reflective_chain);
criterion_main!(benches);

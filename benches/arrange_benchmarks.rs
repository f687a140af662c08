use criterion::{Criterion, criterion_group, criterion_main};
use fluent_arrange::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

trait Clock: Concrete + Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Clone)]
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[derive(Constructible)]
#[allow(dead_code)]
struct Scheduler {
    clock: Arc<dyn Clock>,
    retries: u32,
    name: String,
}

fn port(ty: DependencyType) -> MockResult {
    if ty.is::<Arc<dyn Clock>>() {
        Ok(instance(Arc::new(FixedClock(0)) as Arc<dyn Clock>))
    } else if ty.is::<u32>() {
        Ok(instance(3u32))
    } else {
        Ok(instance(String::from("nightly")))
    }
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    group.bench_function("context", |b| {
        b.iter(|| Arrange::context::<Scheduler>(black_box(port)))
    });

    group.bench_function("legacy_object", |b| {
        b.iter(|| Fluent::arrange::<Scheduler>(black_box(port)))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("sut", |b| b.iter(|| Arrange::sut::<Scheduler>(port)));

    group.bench_function("object_fresh_instance", |b| {
        let object = Fluent::arrange::<Scheduler>(port);
        b.iter(|| object.as_ref().map(|o| o.build_sut().is_ok()))
    });

    group.finish();
}

fn bench_fluent_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("fluent");

    group.bench_function("dependency_lookup", |b| {
        let context = Arrange::context::<Scheduler>(port);
        b.iter(|| {
            context
                .as_ref()
                .map(|ctx| ctx.dependency::<u32>().is_ok())
        })
    });

    group.bench_function("resolve_and_replace", |b| {
        b.iter(|| {
            let mut context = Arrange::context::<Scheduler>(port)?;
            context.replace(black_box(7u32))?;
            Ok::<_, ArrangeError>(context)
        })
    });

    group.bench_function("dependency_as", |b| {
        let context = Arrange::context::<Scheduler>(port);
        b.iter(|| {
            context.as_ref().map(|ctx| {
                ctx.dependency_as::<Arc<dyn Clock>, FixedClock>()
                    .map(|clock| clock.now())
                    .is_ok()
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolution,
    bench_build,
    bench_fluent_operations
);
criterion_main!(benches);

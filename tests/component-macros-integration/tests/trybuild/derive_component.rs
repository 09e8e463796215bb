use component_macros::Component;
use infrastructure_common::Instance;
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Component)]
struct Clock;

#[derive(Component)]
struct Cache<T: Send + Sync + 'static> {
    items: Vec<T>,
}

#[derive(Component)]
struct Marker<T: Send + Sync + 'static>(PhantomData<T>);

fn main() {
    let instances: Vec<Instance> = vec![
        Arc::new(Clock),
        Arc::new(Cache::<u32> { items: vec![1, 2] }),
        Arc::new(Marker::<String>(PhantomData)),
    ];
    assert_eq!(instances.len(), 3);
}

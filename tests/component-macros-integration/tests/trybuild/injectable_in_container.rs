use component_macros::{Component, Injectable};
use di_impl::Container;
use std::sync::Arc;

#[derive(Component, Injectable)]
struct Database;

#[derive(Component, Injectable)]
#[inject("db")]
struct Repository {
    database: Arc<Database>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut container = Container::new();
    container
        .register_singleton::<Database>("database", &["db"])?
        .register_scoped::<Repository>("repository", &[])?;
    container.bootstrap()?;

    let scope = container.create_scope()?;
    let repository = scope.resolve::<Repository>("repository")?;
    assert!(Arc::ptr_eq(&repository.database, &container.resolve::<Database>("db")?));
    Ok(())
}

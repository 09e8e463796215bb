//! 组件宏与容器的端到端集成测试

use async_trait::async_trait;
use component_macros::{Component, Injectable};
use di_abstractions::ServiceLocator;
use di_impl::{Container, ScopeHandle};
use infrastructure_common::{
    Component, DependencyResult, DisposeError, Injectable, ResolvedDependencies,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Component, Injectable)]
struct Settings;

/// 含非注入字段的组件需要手动实现 `Injectable`
struct ConnectionPool {
    settings: Arc<Settings>,
    closed: AtomicBool,
}

impl Injectable for ConnectionPool {
    fn dependencies() -> &'static [&'static str] {
        &["settings"]
    }

    fn create(dependencies: ResolvedDependencies) -> DependencyResult<Self> {
        Ok(Self {
            settings: dependencies.get(0)?,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Component for ConnectionPool {
    async fn dispose(&self) -> Result<(), DisposeError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Component, Injectable)]
#[inject("pool", "serviceLocator")]
struct RequestDispatcher {
    pool: Arc<ConnectionPool>,
    locator: Arc<ScopeHandle>,
}

#[derive(Component, Injectable)]
#[inject("pool")]
struct UnitOfWork(Arc<ConnectionPool>);

fn container() -> Container {
    let mut container = Container::new();
    container
        .register_singleton::<Settings>("settings", &[])
        .unwrap()
        .register_singleton::<ConnectionPool>("pool", &[])
        .unwrap()
        .register_transient::<RequestDispatcher>("dispatcher", &[])
        .unwrap()
        .register_scoped::<UnitOfWork>("unitOfWork", &["uow"])
        .unwrap();
    container.bootstrap().unwrap();
    container
}

#[test]
fn test_derived_dependencies_drive_verification() {
    let mut container = Container::new();
    container
        .register_transient::<RequestDispatcher>("dispatcher", &[])
        .unwrap();

    assert!(container.bootstrap().is_err());
    assert_eq!(
        RequestDispatcher::dependencies(),
        &["pool", "serviceLocator"]
    );
}

#[test]
fn test_derived_components_resolve_with_shared_singletons() {
    let container = container();
    let scope = container.create_scope().unwrap();

    let dispatcher = scope.resolve::<RequestDispatcher>("dispatcher").unwrap();
    let unit_of_work = scope.resolve::<UnitOfWork>("uow").unwrap();
    let settings = container.resolve::<Settings>("settings").unwrap();

    assert!(Arc::ptr_eq(&dispatcher.pool, &unit_of_work.0));
    assert!(Arc::ptr_eq(&dispatcher.pool.settings, &settings));
}

#[test]
fn test_injected_service_locator_creates_scopes() {
    let container = container();
    let dispatcher = container.resolve::<RequestDispatcher>("dispatcher").unwrap();

    let request_scope = dispatcher.locator.create_scope().unwrap();
    let first = request_scope.resolve::<UnitOfWork>("unitOfWork").unwrap();
    let second = request_scope.resolve::<UnitOfWork>("uow").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_manual_dispose_runs_on_container_dispose() {
    let container = container();
    let pool = container.resolve::<ConnectionPool>("pool").unwrap();

    let scope = container.create_scope().unwrap();
    scope.resolve::<UnitOfWork>("unitOfWork").unwrap();
    scope.dispose().await;
    assert!(!pool.closed.load(Ordering::SeqCst));

    container.dispose().await;
    assert!(pool.closed.load(Ordering::SeqCst));
}

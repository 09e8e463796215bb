//! 容器状态机、安装器与释放集成测试

use di_abstractions::{ComponentInstaller, Registry, Scope, ServiceLocator};
use di_impl::{Container, ScopeHandle};
use di_impl_integration_tests::{node, Disposable, DisposalLog, Node};
use infrastructure_common::{
    ContainerConfig, DependencyError, DependencyResult, Lifestyle, ReservedKeys, ScopeType,
};
use std::sync::Arc;

struct StorageInstaller;

impl ComponentInstaller for StorageInstaller {
    fn install(&self, registry: &mut dyn Registry) -> DependencyResult<()> {
        registry.register("database", node(&[]), Lifestyle::Singleton, &["db"])?;
        registry.register("repository", node(&["db"]), Lifestyle::Scoped, &[])?;
        Ok(())
    }
}

fn disposal_container(log: &Arc<DisposalLog>) -> anyhow::Result<Container> {
    let mut container = Container::new();
    container
        .register_instance("disposalLog", Arc::clone(log), &[])?
        .register("pool", Disposable::provider(false), Lifestyle::Singleton, &[])?;
    container.register("session", Disposable::provider(true), Lifestyle::Scoped, &["tx"])?;
    container.register("handler", Disposable::provider(false), Lifestyle::Scoped, &[])?;
    container.register("request", Disposable::provider(false), Lifestyle::Transient, &[])?;
    container.bootstrap()?;
    Ok(container)
}

#[test]
fn test_operations_before_bootstrap_are_invalid() -> anyhow::Result<()> {
    let mut container = Container::new();
    container.register("a", node(&[]), Lifestyle::Transient, &[])?;

    assert!(matches!(
        container.resolve::<Node>("a"),
        Err(DependencyError::InvalidOperation { .. })
    ));
    assert!(matches!(
        container.resolve::<ScopeHandle>(ReservedKeys::SERVICE_LOCATOR),
        Err(DependencyError::InvalidOperation { .. })
    ));
    assert!(matches!(
        container.create_scope(),
        Err(DependencyError::InvalidOperation { .. })
    ));
    Ok(())
}

#[test]
fn test_mutation_after_bootstrap_is_invalid() -> anyhow::Result<()> {
    let mut container = Container::new();
    container.register("a", node(&[]), Lifestyle::Transient, &[])?;
    container.bootstrap()?;

    assert!(matches!(
        container.bootstrap(),
        Err(DependencyError::InvalidOperation { .. })
    ));
    assert!(matches!(
        container.register("b", node(&[]), Lifestyle::Transient, &[]),
        Err(DependencyError::InvalidOperation { .. })
    ));
    assert!(matches!(
        container.install(&StorageInstaller),
        Err(DependencyError::InvalidOperation { .. })
    ));
    assert!(matches!(
        container.deregister("a"),
        Err(DependencyError::InvalidOperation { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_everything_after_dispose_is_object_disposed() -> anyhow::Result<()> {
    let mut container = Container::new();
    container.register("a", node(&[]), Lifestyle::Singleton, &[])?;
    container.bootstrap()?;
    let scope = container.create_scope()?;

    container.dispose().await;

    assert!(container.is_disposed());
    assert!(matches!(
        container.resolve::<Node>("a"),
        Err(DependencyError::ObjectDisposed { .. })
    ));
    assert!(matches!(
        container.create_scope(),
        Err(DependencyError::ObjectDisposed { .. })
    ));
    assert!(matches!(
        container.register("b", node(&[]), Lifestyle::Transient, &[]),
        Err(DependencyError::ObjectDisposed { .. })
    ));
    assert!(matches!(
        container.bootstrap(),
        Err(DependencyError::ObjectDisposed { .. })
    ));
    // 子作用域仍然可用，但单例转发到已释放的根作用域
    assert!(matches!(
        scope.resolve::<Node>("a"),
        Err(DependencyError::ObjectDisposed { .. })
    ));
    Ok(())
}

#[test]
fn test_installer_and_closure_installer() -> anyhow::Result<()> {
    let mut container = Container::new();
    container.install(&StorageInstaller)?.install(
        &|registry: &mut dyn Registry| -> DependencyResult<()> {
            registry.register("cache", node(&["database"]), Lifestyle::Singleton, &[])?;
            Ok(())
        },
    )?;
    container.bootstrap()?;

    assert!(container.contains("db"));
    assert_eq!(container.registrations().len(), 3);

    let scope = container.create_scope()?;
    let repository = scope.resolve::<Node>("repository")?;
    assert_eq!(repository.key, "repository");
    assert!(Arc::ptr_eq(
        &container.resolve::<Node>("db")?,
        &container.resolve::<Node>("database")?
    ));
    Ok(())
}

#[test]
fn test_installer_failure_propagates() {
    let mut container = Container::new();
    let result = container.install(&|registry: &mut dyn Registry| -> DependencyResult<()> {
        registry.register("a", node(&[]), Lifestyle::Transient, &[])?;
        registry.register("a", node(&[]), Lifestyle::Transient, &[])?;
        Ok(())
    });

    assert!(matches!(
        result,
        Err(DependencyError::DuplicateRegistration { ref key }) if key == "a"
    ));
}

#[test]
fn test_fluent_registration_through_registry_facade() -> anyhow::Result<()> {
    let mut container = Container::new();
    {
        let registry: &mut dyn Registry = &mut container;
        registry
            .register_instance("log", Arc::new(DisposalLog::default()), &["journal"])?
            .deregister("journal")?;
    }
    assert!(!container.contains("log"));
    assert!(matches!(
        container.deregister("log"),
        Err(DependencyError::ComponentNotRegistered { .. })
    ));
    Ok(())
}

#[test]
fn test_alias_collisions_and_reserved_key() {
    let mut container = Container::new();
    assert!(container
        .register("a", node(&[]), Lifestyle::Transient, &["shared"])
        .is_ok());
    assert!(matches!(
        container.register("b", node(&[]), Lifestyle::Transient, &["shared"]),
        Err(DependencyError::DuplicateRegistration { ref key }) if key == "shared"
    ));
    assert!(matches!(
        container.register("shared", node(&[]), Lifestyle::Transient, &[]),
        Err(DependencyError::DuplicateRegistration { .. })
    ));
    assert!(matches!(
        container.register(" serviceLocator ", node(&[]), Lifestyle::Transient, &[]),
        Err(DependencyError::Validation { .. })
    ));
    assert!(matches!(
        container.register("   ", node(&[]), Lifestyle::Transient, &[]),
        Err(DependencyError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_child_disposal_is_isolated_and_logs_failures() -> anyhow::Result<()> {
    let log = Arc::new(DisposalLog::default());
    let container = disposal_container(&log)?;

    let first = container.create_scope()?;
    let second = container.create_scope()?;
    first.resolve::<Disposable>("tx")?;
    first.resolve::<Disposable>("session")?;
    first.resolve::<Disposable>("handler")?;
    first.resolve::<Disposable>("request")?;
    first.resolve::<Disposable>("pool")?;
    second.resolve::<Disposable>("session")?;

    first.dispose().await;
    first.dispose().await;

    // 失败的 session 不影响 handler；别名不会导致重复释放；瞬时与单例组件不归子作用域释放
    assert_eq!(log.entries(), vec!["handler", "session"]);
    assert!(second.resolve::<Disposable>("session").is_ok());
    assert!(container.resolve::<Disposable>("pool").is_ok());

    second.dispose().await;
    assert_eq!(log.count("session"), 2);
    Ok(())
}

#[tokio::test]
async fn test_container_disposal_reaches_singletons_and_instances_once() -> anyhow::Result<()> {
    let log = Arc::new(DisposalLog::default());
    let container = disposal_container(&log)?;
    container.resolve::<Disposable>("pool")?;

    let external = Arc::new(Disposable::new("external", Arc::clone(&log), true));
    let mut other = Container::new();
    other.register_instance("external", Arc::clone(&external), &[])?;
    other.bootstrap()?;

    container.dispose().await;
    container.dispose().await;
    other.dispose().await;

    assert_eq!(log.count("pool"), 1);
    assert_eq!(log.count("external"), 1);
    Ok(())
}

#[tokio::test]
async fn test_service_locator_creates_and_disposes_child_scopes() -> anyhow::Result<()> {
    let log = Arc::new(DisposalLog::default());
    let container = disposal_container(&log)?;

    let locator = container.resolve::<ScopeHandle>(ReservedKeys::SERVICE_LOCATOR)?;
    let child: Box<dyn ServiceLocator> = locator.create_scope()?;
    assert_eq!(child.scope_type(), ScopeType::Child);
    child.resolve::<Disposable>("handler")?;

    child.dispose().await;
    assert_eq!(log.entries(), vec!["handler"]);

    // 通过句柄释放根作用域的请求被忽略
    locator.dispose().await;
    assert!(!container.is_disposed());
    assert!(container.resolve::<Disposable>("pool").is_ok());
    Ok(())
}

#[test]
fn test_container_from_toml_config() -> anyhow::Result<()> {
    let config = ContainerConfig::from_toml_str(
        r#"
        name = "orders"
        max_resolution_depth = 2
        "#,
    )?;
    let mut container = Container::with_config(config)?;
    container.register("a", node(&["b"]), Lifestyle::Transient, &[])?;
    container.register("b", node(&["c"]), Lifestyle::Transient, &[])?;
    container.register("c", node(&[]), Lifestyle::Transient, &[])?;
    container.bootstrap()?;

    assert_eq!(container.info().name, "orders");
    assert!(container.resolve::<Node>("b").is_ok());
    assert!(matches!(
        container.resolve::<Node>("a"),
        Err(DependencyError::ResolutionDepthExceeded { max_depth: 2, .. })
    ));

    let scope = container.create_scope()?;
    assert!(scope.info().name.starts_with("orders."));
    Ok(())
}

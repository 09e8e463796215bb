//! 依赖注入容器

use crate::child_scope::ChildScope;
use crate::registration::ComponentRegistration;
use crate::registry::ComponentRegistry;
use crate::scope::ScopeCore;
use async_trait::async_trait;
use di_abstractions::{
    resolve_typed, ComponentInstaller, ComponentProvider, Registry, Scope, ServiceLocator,
};
use infrastructure_common::{
    Component, ConfigResult, ContainerConfig, DependencyError, DependencyResult, Injectable,
    Instance, Lifestyle, ScopeInfo, ScopeType,
};
use std::sync::Arc;
use tracing::info;

/// 依赖注入容器
///
/// 容器是根作用域，独占注册表。使用流程：
///
/// 1. 注册组件（`register_*`、[`Container::install`]）
/// 2. [`Container::bootstrap`] 验证依赖图
/// 3. 解析组件或创建子作用域
/// 4. [`Container::dispose`] 释放单例与现成实例
///
/// ```ignore
/// let mut container = Container::new();
/// container
///     .register_singleton::<Database>("database", &["db"])?
///     .register_scoped::<UnitOfWork>("unitOfWork", &[])?;
/// container.bootstrap()?;
///
/// let scope = container.create_scope()?;
/// let uow = scope.resolve::<UnitOfWork>("unitOfWork")?;
/// scope.dispose().await;
/// container.dispose().await;
/// ```
pub struct Container {
    config: ContainerConfig,
    registry: Arc<ComponentRegistry>,
    root: Arc<ScopeCore>,
}

impl Container {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::build(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ContainerConfig) -> Self {
        let registry = Arc::new(ComponentRegistry::new(config.log_lookup_misses));
        let root = ScopeCore::root(
            ScopeInfo::root(config.name.clone()),
            Arc::clone(&registry),
            config.max_resolution_depth,
        );
        Self {
            config,
            registry,
            root,
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 根作用域信息
    pub fn info(&self) -> &ScopeInfo {
        self.root.info()
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.root.is_bootstrapped()
    }

    pub fn is_disposed(&self) -> bool {
        self.root.is_disposed()
    }

    /// 当前注册信息，按注册顺序
    pub fn registrations(&self) -> Vec<Arc<ComponentRegistration>> {
        self.registry.registrations()
    }

    /// 键或别名是否已注册
    pub fn contains(&self, key: &str) -> bool {
        self.registry.contains(key)
    }

    fn ensure_registrable(&self) -> DependencyResult<()> {
        if self.is_disposed() {
            return Err(DependencyError::object_disposed(format!(
                "容器 '{}'",
                self.config.name
            )));
        }
        if self.is_bootstrapped() {
            return Err(DependencyError::invalid_operation(
                "容器启动后不能再修改注册",
            ));
        }
        Ok(())
    }

    /// 以瞬时生命周期注册组件
    pub fn register_transient<T: Injectable>(
        &mut self,
        key: &str,
        aliases: &[&str],
    ) -> DependencyResult<&mut Self> {
        self.register(key, ComponentProvider::of::<T>(), Lifestyle::Transient, aliases)?;
        Ok(self)
    }

    /// 以作用域生命周期注册组件
    pub fn register_scoped<T: Injectable>(
        &mut self,
        key: &str,
        aliases: &[&str],
    ) -> DependencyResult<&mut Self> {
        self.register(key, ComponentProvider::of::<T>(), Lifestyle::Scoped, aliases)?;
        Ok(self)
    }

    /// 以单例生命周期注册组件
    pub fn register_singleton<T: Injectable>(
        &mut self,
        key: &str,
        aliases: &[&str],
    ) -> DependencyResult<&mut Self> {
        self.register(key, ComponentProvider::of::<T>(), Lifestyle::Singleton, aliases)?;
        Ok(self)
    }

    /// 注册现成实例，容器释放时一并释放
    pub fn register_instance<T: Component>(
        &mut self,
        key: &str,
        instance: Arc<T>,
        aliases: &[&str],
    ) -> DependencyResult<&mut Self> {
        self.register(key, ComponentProvider::instance(instance), Lifestyle::Instance, aliases)?;
        Ok(self)
    }

    /// 调用安装器注册一组组件
    pub fn install(&mut self, installer: &dyn ComponentInstaller) -> DependencyResult<&mut Self> {
        self.ensure_registrable()?;
        installer.install(self)?;
        Ok(self)
    }

    /// 启动容器
    ///
    /// 先验证依赖图，验证失败时容器保持未启动状态。重复启动返回
    /// [`DependencyError::InvalidOperation`]。
    pub fn bootstrap(&mut self) -> DependencyResult<()> {
        if self.is_disposed() {
            return Err(DependencyError::object_disposed(format!(
                "容器 '{}'",
                self.config.name
            )));
        }
        if self.is_bootstrapped() {
            return Err(DependencyError::invalid_operation("容器已经启动"));
        }

        self.registry.verify_registrations()?;
        self.root.mark_bootstrapped();

        info!(
            "容器 '{}' 启动完成, 共 {} 个组件",
            self.config.name,
            self.registry.len()
        );
        Ok(())
    }

    /// 创建子作用域
    pub fn create_scope(&self) -> DependencyResult<ChildScope> {
        self.root.create_child().map(ChildScope::from_core)
    }

    /// 按键解析具体类型的组件
    pub fn resolve<T: Component>(&self, key: &str) -> DependencyResult<Arc<T>> {
        resolve_typed(self, key)
    }

    /// 释放容器
    ///
    /// 先释放根作用域缓存的单例，再释放注册表中的现成实例。幂等。
    /// 子作用域需要由各自的创建者释放。
    pub async fn dispose(&self) {
        self.root.dispose().await;
        self.registry.dispose().await;
        info!("容器 '{}' 已释放", self.config.name);
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for Container {
    fn register(
        &mut self,
        key: &str,
        provider: ComponentProvider,
        lifestyle: Lifestyle,
        aliases: &[&str],
    ) -> DependencyResult<()> {
        self.ensure_registrable()?;
        self.registry.register(key, provider, lifestyle, aliases)?;
        Ok(())
    }

    fn deregister(&mut self, key: &str) -> DependencyResult<()> {
        self.ensure_registrable()?;
        self.registry.deregister(key)?;
        Ok(())
    }
}

impl Scope for Container {
    fn scope_type(&self) -> ScopeType {
        ScopeType::Root
    }

    fn resolve_instance(&self, key: &str) -> DependencyResult<Instance> {
        self.root.resolve_instance(key)
    }
}

#[async_trait]
impl ServiceLocator for Container {
    fn create_scope(&self) -> DependencyResult<Box<dyn ServiceLocator>> {
        let scope = Container::create_scope(self)?;
        Ok(Box::new(scope))
    }

    async fn dispose(&self) {
        Container::dispose(self).await;
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("info", self.info())
            .field("bootstrapped", &self.is_bootstrapped())
            .field("disposed", &self.is_disposed())
            .field("registry", &self.registry)
            .finish()
    }
}

//! 作用域解析引擎
//!
//! 根作用域（容器）与子作用域共用 [`ScopeCore`]：生命周期转发规则、实例缓存、
//! 启动/释放状态都在这里实现。

use crate::child_scope::ChildScope;
use crate::registration::ComponentRegistration;
use crate::registry::ComponentRegistry;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::{ComponentProvider, Scope, ServiceLocator};
use infrastructure_common::{
    normalize_key, Component, DependencyError, DependencyResult, Instance, Lifestyle,
    ReservedKeys, ResolvedDependencies, ScopeInfo, ScopeType,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

pub(crate) struct ScopeCore {
    info: ScopeInfo,
    registry: Arc<ComponentRegistry>,
    /// 只用于转发单例解析，不延长父作用域的生命周期
    parent: Option<Weak<ScopeCore>>,
    /// 组件键与别名到缓存实例
    instances: DashMap<String, Instance>,
    /// 按创建顺序记录的缓存实例，释放时逆序处理
    created: Mutex<Vec<(String, Instance)>>,
    bootstrapped: AtomicBool,
    disposed: AtomicBool,
    disposal: OnceCell<()>,
    max_resolution_depth: usize,
}

impl ScopeCore {
    /// 创建未启动的根作用域
    pub(crate) fn root(
        info: ScopeInfo,
        registry: Arc<ComponentRegistry>,
        max_resolution_depth: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            info,
            registry,
            parent: None,
            instances: DashMap::new(),
            created: Mutex::new(Vec::new()),
            bootstrapped: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            disposal: OnceCell::new(),
            max_resolution_depth,
        })
    }

    /// 创建子作用域，子作用域创建后立即可用
    pub(crate) fn create_child(self: &Arc<Self>) -> DependencyResult<Arc<Self>> {
        self.ensure_usable()?;

        let info = self.info.child();
        debug!("创建子作用域: {}", info.name);

        Ok(Arc::new(Self {
            info,
            registry: Arc::clone(&self.registry),
            parent: Some(Arc::downgrade(self)),
            instances: DashMap::new(),
            created: Mutex::new(Vec::new()),
            bootstrapped: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
            disposal: OnceCell::new(),
            max_resolution_depth: self.max_resolution_depth,
        }))
    }

    pub(crate) fn info(&self) -> &ScopeInfo {
        &self.info
    }

    pub(crate) fn scope_type(&self) -> ScopeType {
        self.info.scope_type
    }

    pub(crate) fn mark_bootstrapped(&self) {
        self.bootstrapped.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::SeqCst)
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// 释放状态先于启动状态检查
    fn ensure_usable(&self) -> DependencyResult<()> {
        if self.is_disposed() {
            return Err(DependencyError::object_disposed(format!(
                "作用域 '{}'",
                self.info.name
            )));
        }
        if !self.is_bootstrapped() {
            return Err(DependencyError::invalid_operation(format!(
                "作用域 '{}' 尚未启动",
                self.info.name
            )));
        }
        Ok(())
    }

    /// 按键解析实例
    pub(crate) fn resolve_instance(self: &Arc<Self>, key: &str) -> DependencyResult<Instance> {
        self.ensure_usable()?;

        let key = normalize_key(key)?;
        if ReservedKeys::is_reserved(key) {
            return Ok(self.locator());
        }

        let registration =
            self.registry
                .find(key)
                .ok_or_else(|| DependencyError::ComponentNotRegistered {
                    key: key.to_string(),
                })?;

        self.find_instance(&registration, 0)
    }

    /// 指向当前作用域的服务定位器
    fn locator(self: &Arc<Self>) -> Instance {
        Arc::new(ScopeHandle {
            core: Arc::downgrade(self),
            scope_type: self.scope_type(),
        })
    }

    fn parent(&self) -> DependencyResult<Arc<ScopeCore>> {
        self.parent
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| {
                DependencyError::object_disposed(format!("作用域 '{}' 的父作用域", self.info.name))
            })
    }

    fn find_instance(
        self: &Arc<Self>,
        registration: &ComponentRegistration,
        depth: usize,
    ) -> DependencyResult<Instance> {
        match registration.lifestyle() {
            Lifestyle::Instance => registration.instance().ok_or_else(|| {
                DependencyError::invalid_operation(format!(
                    "组件 '{}' 没有现成实例",
                    registration.key()
                ))
            }),
            Lifestyle::Singleton => match self.scope_type() {
                ScopeType::Child => {
                    let parent = self.parent()?;
                    parent.ensure_usable()?;
                    parent.find_instance(registration, depth)
                }
                ScopeType::Root => self.find_cached_instance(registration, depth),
            },
            Lifestyle::Scoped => match self.scope_type() {
                ScopeType::Root => Err(DependencyError::IncompatibleLifecycle {
                    message: format!(
                        "不能从根作用域解析作用域组件 '{}'",
                        registration.key()
                    ),
                }),
                ScopeType::Child => self.find_cached_instance(registration, depth),
            },
            Lifestyle::Transient => self.create_instance(registration, depth),
        }
    }

    /// 缓存命中时直接返回；否则构造并以键和所有别名缓存，并发构造时先写入者生效
    fn find_cached_instance(
        self: &Arc<Self>,
        registration: &ComponentRegistration,
        depth: usize,
    ) -> DependencyResult<Instance> {
        if let Some(cached) = self
            .instances
            .get(registration.key())
            .map(|entry| Arc::clone(entry.value()))
        {
            return Ok(cached);
        }

        let created = self.create_instance(registration, depth)?;
        let instance = match self.instances.entry(registration.key().to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&created));
                self.created
                    .lock()
                    .push((registration.key().to_string(), Arc::clone(&created)));
                created
            }
        };

        for alias in registration.aliases() {
            self.instances.insert(alias.clone(), Arc::clone(&instance));
        }
        Ok(instance)
    }

    /// 按声明顺序解析依赖并调用工厂
    fn create_instance(
        self: &Arc<Self>,
        registration: &ComponentRegistration,
        depth: usize,
    ) -> DependencyResult<Instance> {
        if depth >= self.max_resolution_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                key: registration.key().to_string(),
                max_depth: self.max_resolution_depth,
            });
        }

        let ComponentProvider::Factory { factory, .. } = registration.provider() else {
            return Err(DependencyError::invalid_operation(format!(
                "组件 '{}' 是现成实例，不能构造",
                registration.key()
            )));
        };

        let mut arguments = ResolvedDependencies::new(registration.key());
        for dependency in registration.dependencies() {
            let instance = if ReservedKeys::is_reserved(dependency) {
                self.locator()
            } else {
                let target = self.registry.find(dependency).ok_or_else(|| {
                    DependencyError::DependencyNotRegistered {
                        dependency: dependency.clone(),
                        component: registration.key().to_string(),
                    }
                })?;
                self.find_instance(&target, depth + 1)?
            };
            arguments.push(dependency.as_str(), instance);
        }

        debug!("构造组件: {} ({})", registration.key(), registration.type_name());
        factory(arguments)
    }

    /// 释放本作用域缓存的实例
    ///
    /// 调用后作用域立即不可用。幂等，逆创建顺序逐个等待释放，失败只记录日志。
    /// 不影响父作用域、其他子作用域和注册表。
    pub(crate) async fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);

        self.disposal
            .get_or_init(|| async {
                let created = std::mem::take(&mut *self.created.lock());
                self.instances.clear();

                for (key, instance) in created.into_iter().rev() {
                    if let Err(e) = instance.dispose().await {
                        error!("释放作用域 '{}' 中的组件 '{}' 失败: {}", self.info.name, key, e);
                    }
                }
                debug!("作用域已释放: {}", self.info.name);
            })
            .await;
    }
}

/// 服务定位器句柄
///
/// 解析保留键 `serviceLocator` 得到的对象，指向执行解析的作用域。句柄不持有作用域，
/// 作用域销毁后通过句柄的操作返回 [`DependencyError::ObjectDisposed`]。
pub struct ScopeHandle {
    core: Weak<ScopeCore>,
    scope_type: ScopeType,
}

impl ScopeHandle {
    fn core(&self) -> DependencyResult<Arc<ScopeCore>> {
        self.core
            .upgrade()
            .ok_or_else(|| DependencyError::object_disposed("服务定位器指向的作用域"))
    }

    /// 按键解析具体类型的组件
    pub fn resolve<T: Component>(&self, key: &str) -> DependencyResult<Arc<T>> {
        di_abstractions::resolve_typed(self, key)
    }
}

impl Component for ScopeHandle {}

impl Scope for ScopeHandle {
    fn scope_type(&self) -> ScopeType {
        self.scope_type
    }

    fn resolve_instance(&self, key: &str) -> DependencyResult<Instance> {
        self.core()?.resolve_instance(key)
    }
}

#[async_trait]
impl ServiceLocator for ScopeHandle {
    fn create_scope(&self) -> DependencyResult<Box<dyn ServiceLocator>> {
        let child = self.core()?.create_child()?;
        Ok(Box::new(ChildScope::from_core(child)))
    }

    /// 只释放子作用域，根作用域由容器负责释放
    async fn dispose(&self) {
        let Ok(core) = self.core() else {
            return;
        };
        match core.scope_type() {
            ScopeType::Child => core.dispose().await,
            ScopeType::Root => warn!("忽略通过服务定位器释放根作用域 '{}' 的请求", core.info().name),
        }
    }
}

impl std::fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeHandle")
            .field("scope_type", &self.scope_type)
            .field("alive", &(self.core.strong_count() > 0))
            .finish()
    }
}

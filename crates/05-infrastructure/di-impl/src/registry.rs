//! 组件注册表实现

use crate::registration::ComponentRegistration;
use di_abstractions::ComponentProvider;
use infrastructure_common::{
    normalize_key, DependencyError, DependencyResult, Lifestyle, ReservedKeys,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

#[derive(Default)]
struct RegistryState {
    /// 按注册顺序排列，图遍历按此顺序进行
    registrations: Vec<Arc<ComponentRegistration>>,
    /// 键与别名共享的命名空间
    index: HashMap<String, Arc<ComponentRegistration>>,
    /// 已注销、等待随注册表一起释放的注册信息
    retired: Vec<Arc<ComponentRegistration>>,
}

/// 组件注册表
///
/// 由容器创建并持有，通过 `Arc` 共享给所有子作用域。容器启动后注册表只读。
pub struct ComponentRegistry {
    state: RwLock<RegistryState>,
    log_lookup_misses: bool,
    disposal: OnceCell<()>,
}

impl ComponentRegistry {
    /// 创建空注册表
    pub fn new(log_lookup_misses: bool) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            log_lookup_misses,
            disposal: OnceCell::new(),
        }
    }

    /// 注册组件
    ///
    /// 键或任一别名已被占用时返回 [`DependencyError::DuplicateRegistration`]。
    pub fn register<S: AsRef<str>>(
        &self,
        key: &str,
        provider: ComponentProvider,
        lifestyle: Lifestyle,
        aliases: &[S],
    ) -> DependencyResult<Arc<ComponentRegistration>> {
        let registration = Arc::new(ComponentRegistration::new(key, provider, lifestyle, aliases)?);

        let mut state = self.state.write();
        if let Some(taken) = registration.names().find(|name| state.index.contains_key(*name)) {
            return Err(DependencyError::DuplicateRegistration {
                key: taken.to_string(),
            });
        }

        for name in registration.names() {
            state.index.insert(name.to_string(), Arc::clone(&registration));
        }
        state.registrations.push(Arc::clone(&registration));

        info!(
            "注册组件: {} ({}, {})",
            registration.key(),
            registration.lifestyle(),
            registration.type_name()
        );
        Ok(registration)
    }

    /// 注销组件
    ///
    /// 可以用键或任一别名注销，注册信息的所有名称一并移除。注销的注册信息
    /// 在注册表释放时释放。
    pub fn deregister(&self, key: &str) -> DependencyResult<Arc<ComponentRegistration>> {
        let key = normalize_key(key)?;

        let mut state = self.state.write();
        let registration = state
            .index
            .get(key)
            .cloned()
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                key: key.to_string(),
            })?;

        for name in registration.names() {
            state.index.remove(name);
        }
        state
            .registrations
            .retain(|existing| !Arc::ptr_eq(existing, &registration));
        state.retired.push(Arc::clone(&registration));

        info!("注销组件: {}", registration.key());
        Ok(registration)
    }

    /// 按键或别名查找注册信息
    ///
    /// 未找到时返回 `None`，由调用方决定是否视为错误。
    pub fn find(&self, key: &str) -> Option<Arc<ComponentRegistration>> {
        let key = key.trim();
        let state = self.state.read();
        let found = state.index.get(key).cloned().or_else(|| {
            state
                .registrations
                .iter()
                .find(|registration| registration.matches(key))
                .cloned()
        });

        if found.is_none() && self.log_lookup_misses {
            debug!("未找到组件注册: '{}'", key);
        }
        found
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.read().index.contains_key(key.trim())
    }

    /// 当前注册信息，按注册顺序
    pub fn registrations(&self) -> Vec<Arc<ComponentRegistration>> {
        self.state.read().registrations.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().registrations.is_empty()
    }

    /// 验证依赖图
    ///
    /// 对每个注册信息做深度优先遍历，检查循环依赖、未注册的依赖，以及单例组件
    /// 直接或间接依赖作用域组件的情况。
    #[instrument(skip_all)]
    pub fn verify_registrations(&self) -> DependencyResult<()> {
        let state = self.state.read();
        let mut visiting = HashSet::new();

        for registration in &state.registrations {
            walk_dependency_graph(&state, registration, &mut visiting, None)?;
        }

        debug!("依赖图验证通过, 共 {} 个组件", state.registrations.len());
        Ok(())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposal.initialized()
    }

    /// 释放所有注册信息，包括已注销的
    ///
    /// 幂等，逐个等待释放完成，单个失败不影响其余注册信息。
    pub async fn dispose(&self) {
        self.disposal
            .get_or_init(|| async {
                let pending = {
                    let state = self.state.read();
                    state
                        .registrations
                        .iter()
                        .chain(state.retired.iter())
                        .cloned()
                        .collect::<Vec<_>>()
                };

                for registration in pending {
                    registration.dispose().await;
                }
                debug!("组件注册表已释放");
            })
            .await;
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ComponentRegistry")
            .field("registrations", &state.registrations)
            .field("retired", &state.retired.len())
            .finish()
    }
}

/// `visiting` 只保存当前路径上的名称，回溯时移除，使共享依赖的兄弟分支不会被误判为循环。
/// `singleton_owner` 是路径上最近的单例组件键。
fn walk_dependency_graph<'a>(
    state: &'a RegistryState,
    registration: &'a ComponentRegistration,
    visiting: &mut HashSet<&'a str>,
    singleton_owner: Option<&'a str>,
) -> DependencyResult<()> {
    if registration.names().any(|name| visiting.contains(name)) {
        return Err(DependencyError::CircularDependency {
            key: registration.key().to_string(),
        });
    }
    visiting.extend(registration.names());

    let singleton_owner = match registration.lifestyle() {
        Lifestyle::Singleton => Some(registration.key()),
        _ => singleton_owner,
    };

    for dependency in registration.dependencies() {
        if ReservedKeys::is_reserved(dependency) {
            continue;
        }

        let target = state
            .index
            .get(dependency.as_str())
            .ok_or_else(|| DependencyError::UnregisteredDependency {
                key: dependency.clone(),
            })?;

        if let (Some(owner), Lifestyle::Scoped) = (singleton_owner, target.lifestyle()) {
            return Err(DependencyError::IncompatibleLifecycle {
                message: format!(
                    "单例组件 '{}' 不能依赖作用域组件 '{}'",
                    owner,
                    target.key()
                ),
            });
        }

        walk_dependency_graph(state, target, visiting, singleton_owner)?;
    }

    for name in registration.names() {
        visiting.remove(name);
    }
    Ok(())
}

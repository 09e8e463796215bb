//! 子作用域

use crate::scope::ScopeCore;
use async_trait::async_trait;
use di_abstractions::{resolve_typed, Scope, ServiceLocator};
use infrastructure_common::{Component, DependencyResult, Instance, ScopeInfo, ScopeType};
use std::sync::Arc;

/// 子作用域
///
/// 由容器或其他作用域创建，与容器共享注册表。作用域组件在子作用域内缓存，
/// 单例组件的解析转发给父作用域。子作用域需要由创建者显式释放。
pub struct ChildScope {
    core: Arc<ScopeCore>,
}

impl ChildScope {
    pub(crate) fn from_core(core: Arc<ScopeCore>) -> Self {
        Self { core }
    }

    /// 作用域信息
    pub fn info(&self) -> &ScopeInfo {
        self.core.info()
    }

    /// 创建嵌套子作用域
    pub fn create_scope(&self) -> DependencyResult<ChildScope> {
        self.core.create_child().map(Self::from_core)
    }

    /// 按键解析具体类型的组件
    pub fn resolve<T: Component>(&self, key: &str) -> DependencyResult<Arc<T>> {
        resolve_typed(self, key)
    }

    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }

    /// 释放本作用域缓存的实例，不影响父作用域
    pub async fn dispose(&self) {
        self.core.dispose().await;
    }
}

impl Scope for ChildScope {
    fn scope_type(&self) -> ScopeType {
        ScopeType::Child
    }

    fn resolve_instance(&self, key: &str) -> DependencyResult<Instance> {
        self.core.resolve_instance(key)
    }
}

#[async_trait]
impl ServiceLocator for ChildScope {
    fn create_scope(&self) -> DependencyResult<Box<dyn ServiceLocator>> {
        let scope = ChildScope::create_scope(self)?;
        Ok(Box::new(scope))
    }

    async fn dispose(&self) {
        ChildScope::dispose(self).await;
    }
}

impl std::fmt::Debug for ChildScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildScope")
            .field("info", self.info())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

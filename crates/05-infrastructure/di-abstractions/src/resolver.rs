//! 作用域与服务定位器抽象接口
//!
//! 提供按键解析组件实例的能力

use async_trait::async_trait;
use infrastructure_common::{
    downcast_instance, Component, DependencyError, DependencyResult, Instance, ScopeType,
};
use std::any::type_name;
use std::sync::Arc;

/// 解析上下文
///
/// 根作用域与子作用域共同实现。
pub trait Scope: Send + Sync {
    /// 作用域类型
    fn scope_type(&self) -> ScopeType;

    /// 按键解析类型擦除的实例
    fn resolve_instance(&self, key: &str) -> DependencyResult<Instance>;
}

/// 服务定位器 trait
///
/// 保留键 `serviceLocator` 解析出的对象实现此 trait，组件可以借助它创建子作用域。
#[async_trait]
pub trait ServiceLocator: Scope {
    /// 创建子作用域
    fn create_scope(&self) -> DependencyResult<Box<dyn ServiceLocator>>;

    /// 释放作用域缓存的实例
    async fn dispose(&self);
}

/// 解析实例并转换为具体类型
pub fn resolve_typed<T, S>(scope: &S, key: &str) -> DependencyResult<Arc<T>>
where
    T: Component,
    S: Scope + ?Sized,
{
    let instance = scope.resolve_instance(key)?;
    downcast_instance::<T>(instance).ok_or_else(|| DependencyError::TypeMismatch {
        key: key.trim().to_string(),
        expected: type_name::<T>(),
    })
}

impl<'s> dyn Scope + 's {
    /// 按键解析具体类型的组件
    pub fn resolve<T: Component>(&self, key: &str) -> DependencyResult<Arc<T>> {
        resolve_typed(self, key)
    }
}

impl<'s> dyn ServiceLocator + 's {
    /// 按键解析具体类型的组件
    pub fn resolve<T: Component>(&self, key: &str) -> DependencyResult<Arc<T>> {
        resolve_typed(self, key)
    }
}

//! 组件基础接口定义
//!
//! 容器中所有可解析的对象都实现 [`Component`]，由容器负责构造的组件还需要实现
//! [`Injectable`]，通过 [`Injectable::dependencies`] 声明按顺序注入的依赖键。

use crate::errors::{DependencyError, DependencyResult};
use async_trait::async_trait;
use std::any::{type_name, Any};
use std::sync::Arc;

/// 组件释放失败时的错误类型
pub type DisposeError = Box<dyn std::error::Error + Send + Sync>;

/// 容器中保存的类型擦除组件实例
pub type Instance = Arc<dyn Component>;

/// 类型擦除辅助 trait，为所有组件自动实现
pub trait AsAny: Any + Send + Sync {
    /// 转换为 `Arc<dyn Any>` 以便向下转型
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// 组件基础 trait
///
/// 所有可以注册到容器的类型都必须实现此 trait。需要在作用域或容器释放时
/// 清理资源的组件覆盖 [`Component::dispose`]。
#[async_trait]
pub trait Component: AsAny {
    /// 释放组件持有的资源
    async fn dispose(&self) -> Result<(), DisposeError> {
        Ok(())
    }
}

/// 可注入组件 trait
///
/// 依赖键的顺序即构造参数的顺序。
pub trait Injectable: Component + Sized {
    /// 声明的依赖键列表，未声明表示没有依赖
    fn dependencies() -> &'static [&'static str] {
        &[]
    }

    /// 使用已解析的依赖构建组件实例
    fn create(dependencies: ResolvedDependencies) -> DependencyResult<Self>;
}

/// 将类型擦除的实例转换为具体类型
pub fn downcast_instance<T: Component>(instance: Instance) -> Option<Arc<T>> {
    instance.into_any_arc().downcast::<T>().ok()
}

/// 按声明顺序解析出的构造参数列表
pub struct ResolvedDependencies {
    component: String,
    entries: Vec<(String, Instance)>,
}

impl ResolvedDependencies {
    /// 为指定组件创建空的参数列表
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            entries: Vec::new(),
        }
    }

    /// 追加一个已解析的依赖
    pub fn push(&mut self, key: impl Into<String>, instance: Instance) {
        self.entries.push((key.into(), instance));
    }

    /// 正在构造的组件键
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依赖键，按参数顺序
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// 获取指定位置的类型擦除实例
    pub fn instance(&self, index: usize) -> DependencyResult<Instance> {
        self.entries
            .get(index)
            .map(|(_, instance)| Arc::clone(instance))
            .ok_or_else(|| DependencyError::ArgumentOutOfRange {
                component: self.component.clone(),
                index,
            })
    }

    /// 获取指定位置的依赖并转换为具体类型
    pub fn get<T: Component>(&self, index: usize) -> DependencyResult<Arc<T>> {
        let instance = self.instance(index)?;
        downcast_instance::<T>(instance).ok_or_else(|| DependencyError::TypeMismatch {
            key: self.entries[index].0.clone(),
            expected: type_name::<T>(),
        })
    }
}

impl std::fmt::Debug for ResolvedDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedDependencies")
            .field("component", &self.component)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! 组件注册表抽象接口
//!
//! [`Registry`] 是安装器看到的注册门面，只暴露注册与注销能力。

use crate::factory::ComponentProvider;
use infrastructure_common::{Component, DependencyResult, Injectable, Lifestyle};
use std::sync::Arc;

/// 组件注册表 trait
///
/// 对象安全，安装器通过 `&mut dyn Registry` 接收它；按生命周期区分的泛型注册方法
/// 定义在 `dyn Registry` 上。
pub trait Registry {
    /// 注册组件
    fn register(
        &mut self,
        key: &str,
        provider: ComponentProvider,
        lifestyle: Lifestyle,
        aliases: &[&str],
    ) -> DependencyResult<()>;

    /// 注销组件及其所有别名
    fn deregister(&mut self, key: &str) -> DependencyResult<()>;
}

impl<'r> dyn Registry + 'r {
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

    /// 注册现成实例
    pub fn register_instance<T: Component>(
        &mut self,
        key: &str,
        instance: Arc<T>,
        aliases: &[&str],
    ) -> DependencyResult<&mut Self> {
        self.register(key, ComponentProvider::instance(instance), Lifestyle::Instance, aliases)?;
        Ok(self)
    }
}

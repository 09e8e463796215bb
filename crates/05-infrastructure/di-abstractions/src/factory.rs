//! 组件提供者
//!
//! 注册时提交给注册表的组件来源：可构造的类型（工厂）或现成的实例。

use infrastructure_common::{
    Component, DependencyResult, Injectable, Instance, ResolvedDependencies,
};
use std::any::type_name;
use std::sync::Arc;

/// 组件工厂函数类型
pub type ComponentFactoryFn =
    Arc<dyn Fn(ResolvedDependencies) -> DependencyResult<Instance> + Send + Sync>;

/// 组件提供者
#[derive(Clone)]
pub enum ComponentProvider {
    /// 由容器按依赖列表构造
    Factory {
        type_name: &'static str,
        dependencies: Vec<String>,
        factory: ComponentFactoryFn,
    },
    /// 注册时提供的现成实例
    Instance {
        type_name: &'static str,
        instance: Instance,
    },
}

impl ComponentProvider {
    /// 从可注入类型创建提供者，依赖列表取自 [`Injectable::dependencies`]
    pub fn of<T: Injectable>() -> Self {
        Self::Factory {
            type_name: type_name::<T>(),
            dependencies: T::dependencies().iter().map(|d| d.to_string()).collect(),
            factory: Arc::new(|dependencies| {
                let component = T::create(dependencies)?;
                Ok(Arc::new(component) as Instance)
            }),
        }
    }

    /// 从闭包创建提供者
    pub fn from_factory<T, F>(dependencies: &[&str], factory: F) -> Self
    where
        T: Component,
        F: Fn(ResolvedDependencies) -> DependencyResult<T> + Send + Sync + 'static,
    {
        Self::Factory {
            type_name: type_name::<T>(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            factory: Arc::new(move |dependencies| {
                let component = factory(dependencies)?;
                Ok(Arc::new(component) as Instance)
            }),
        }
    }

    /// 从现成实例创建提供者
    pub fn instance<T: Component>(instance: Arc<T>) -> Self {
        Self::Instance {
            type_name: type_name::<T>(),
            instance,
        }
    }

    /// 组件类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Factory { type_name, .. } | Self::Instance { type_name, .. } => *type_name,
        }
    }

    /// 声明的依赖键，现成实例没有依赖
    pub fn dependencies(&self) -> &[String] {
        match self {
            Self::Factory { dependencies, .. } => dependencies,
            Self::Instance { .. } => &[],
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance { .. })
    }
}

impl std::fmt::Debug for ComponentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Factory {
                type_name,
                dependencies,
                ..
            } => f
                .debug_struct("Factory")
                .field("type_name", type_name)
                .field("dependencies", dependencies)
                .field("factory", &"<function>")
                .finish(),
            Self::Instance { type_name, .. } => f
                .debug_struct("Instance")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

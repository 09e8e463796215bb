//! di-impl 集中测试工程的共享测试夹具

use async_trait::async_trait;
use di_abstractions::{ComponentProvider, Registry};
use di_impl::Container;
use infrastructure_common::{Component, DisposeError, Lifestyle, ResolvedDependencies};
use parking_lot::Mutex;
use std::sync::Arc;

/// 依赖列表在运行时决定的组件，用于构造任意依赖图
pub struct Node {
    pub key: String,
}

impl Component for Node {}

/// 声明指定依赖的节点提供者
pub fn node(dependencies: &[&str]) -> ComponentProvider {
    ComponentProvider::from_factory(dependencies, |arguments: ResolvedDependencies| {
        Ok(Node {
            key: arguments.component().to_string(),
        })
    })
}

/// 按 `(键, 生命周期, 依赖)` 列表注册节点，不启动容器
pub fn container_with(entries: &[(&str, Lifestyle, &[&str])]) -> anyhow::Result<Container> {
    let mut container = Container::new();
    for (key, lifestyle, dependencies) in entries {
        container.register(key, node(dependencies), *lifestyle, &[])?;
    }
    Ok(container)
}

/// 记录释放顺序
#[derive(Default)]
pub struct DisposalLog {
    entries: Mutex<Vec<String>>,
}

impl DisposalLog {
    pub fn record(&self, name: &str) {
        self.entries.lock().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.lock().iter().filter(|entry| *entry == name).count()
    }
}

impl Component for DisposalLog {}

/// 释放时写入日志的组件，`failing` 为真时释放返回错误
pub struct Disposable {
    name: String,
    log: Arc<DisposalLog>,
    failing: bool,
}

impl Disposable {
    pub fn new(name: &str, log: Arc<DisposalLog>, failing: bool) -> Self {
        Self {
            name: name.to_string(),
            log,
            failing,
        }
    }

    /// 依赖 `disposalLog` 实例的提供者，组件名取注册键
    pub fn provider(failing: bool) -> ComponentProvider {
        ComponentProvider::from_factory(&["disposalLog"], move |arguments: ResolvedDependencies| {
            Ok(Disposable::new(
                arguments.component(),
                arguments.get::<DisposalLog>(0)?,
                failing,
            ))
        })
    }
}

#[async_trait]
impl Component for Disposable {
    async fn dispose(&self) -> Result<(), DisposeError> {
        self.log.record(&self.name);
        if self.failing {
            return Err(format!("{} 释放失败", self.name).into());
        }
        Ok(())
    }
}

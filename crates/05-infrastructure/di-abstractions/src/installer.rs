//! 组件安装器接口

use crate::registry::Registry;
use infrastructure_common::DependencyResult;

/// 组件安装器 trait
///
/// 容器在启动前调用安装器，把一组相关组件一次性注册进来。
pub trait ComponentInstaller {
    /// 向注册表注册组件
    fn install(&self, registry: &mut dyn Registry) -> DependencyResult<()>;
}

impl<F> ComponentInstaller for F
where
    F: Fn(&mut dyn Registry) -> DependencyResult<()>,
{
    fn install(&self, registry: &mut dyn Registry) -> DependencyResult<()> {
        self(registry)
    }
}

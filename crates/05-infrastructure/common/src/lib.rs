//! # Infrastructure Common
//!
//! 依赖注入容器的公共词汇：生命周期、作用域类型、组件 trait、键约定、错误类型与配置。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件基础 trait，可选的异步释放操作
//! - [`Injectable`] - 声明依赖键并由容器构造的组件
//! - [`Lifestyle`] - 组件生命周期
//! - [`ReservedKeys`] - 保留键
//! - [`ContainerConfig`] / [`LoggingConfig`] - 容器与日志配置

pub mod component;
pub mod configuration;
pub mod conventions;
pub mod errors;
pub mod lifecycle;
pub mod logging;

pub use component::*;
pub use configuration::*;
pub use conventions::*;
pub use errors::*;
pub use lifecycle::*;
pub use logging::*;

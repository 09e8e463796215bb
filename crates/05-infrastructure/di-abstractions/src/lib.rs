//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册和按键解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Registry`] - 组件注册门面
//! - [`ComponentProvider`] - 组件来源（工厂或现成实例）
//! - [`ComponentInstaller`] - 组件安装器
//! - [`Scope`] / [`ServiceLocator`] - 解析上下文

pub mod factory;
pub mod installer;
pub mod registry;
pub mod resolver;

pub use factory::*;
pub use installer::*;
pub use registry::*;
pub use resolver::*;

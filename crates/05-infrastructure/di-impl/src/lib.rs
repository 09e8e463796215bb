//! # 依赖注入具体实现
//!
//! 提供基于字符串键的依赖注入容器、组件注册表和作用域解析实现。
//!
//! ## 生命周期规则
//!
//! - `Transient` - 每次解析构造新实例
//! - `Scoped` - 子作用域内共享，从根作用域解析会失败
//! - `Singleton` - 由根作用域构造并缓存，子作用域转发给父作用域
//! - `Instance` - 注册时提供的现成实例
//!
//! 保留键 `serviceLocator` 解析为执行解析的作用域本身（[`ScopeHandle`]）。

mod child_scope;
mod container;
mod registration;
mod registry;
mod scope;

pub use child_scope::ChildScope;
pub use container::Container;
pub use registration::ComponentRegistration;
pub use registry::ComponentRegistry;
pub use scope::ScopeHandle;

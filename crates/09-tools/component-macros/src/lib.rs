//! # Component Macros
//!
//! 为容器组件生成 `Component` 与 `Injectable` 实现的派生宏。
//!
//! ## 核心宏
//!
//! - [`Component`](derive@Component) - 实现默认（空操作）释放的 `Component`
//! - [`Injectable`](derive@Injectable) - 通过 `#[inject(...)]` 声明依赖键，按位置注入字段
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::{Component, Injectable};
//! use std::sync::Arc;
//!
//! #[derive(Component, Injectable)]
//! pub struct Database;
//!
//! #[derive(Component, Injectable)]
//! #[inject("database", "logger")]
//! pub struct UserRepository {
//!     database: Arc<Database>,
//!     logger: Arc<Logger>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod injectable;
mod utils;

/// 组件派生宏
///
/// 为类型实现 `infrastructure_common::Component`，释放操作为空。需要在释放时清理
/// 资源的组件应手动实现 `Component`。
///
/// # 示例
///
/// ```ignore
/// #[derive(Component)]
/// pub struct Clock;
/// ```
#[proc_macro_derive(Component)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(&input).into()
}

/// 可注入组件派生宏
///
/// 结构体属性 `#[inject("a", "b")]` 按顺序声明依赖键，键与字段按位置一一对应，
/// 每个字段必须是 `Arc<T>`。没有 `#[inject]` 属性表示没有依赖。
///
/// # 示例
///
/// ```ignore
/// #[derive(Component, Injectable)]
/// #[inject("clock", "serviceLocator")]
/// pub struct Scheduler {
///     clock: Arc<Clock>,
///     locator: Arc<ScopeHandle>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

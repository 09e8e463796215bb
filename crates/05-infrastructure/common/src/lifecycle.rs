//! 组件生命周期与作用域类型

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifestyle {
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
    /// 作用域模式 - 同一子作用域内共享实例，只能从子作用域解析
    Scoped,
    /// 单例模式 - 由根作用域创建并缓存，所有作用域共享
    Singleton,
    /// 实例模式 - 注册时提供的现成实例
    Instance,
}

impl Lifestyle {
    /// 该生命周期的实例是否由作用域缓存
    pub fn is_cached(self) -> bool {
        matches!(self, Self::Scoped | Self::Singleton)
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transient => "Transient",
            Self::Scoped => "Scoped",
            Self::Singleton => "Singleton",
            Self::Instance => "Instance",
        };
        f.write_str(name)
    }
}

/// 作用域类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeType {
    /// 根作用域（容器本身），没有父作用域
    Root,
    /// 子作用域，总是持有父作用域
    Child,
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Child => f.write_str("Child"),
        }
    }
}

/// 作用域描述信息，用于日志与诊断
#[derive(Debug, Clone)]
pub struct ScopeInfo {
    pub id: Uuid,
    pub name: String,
    pub scope_type: ScopeType,
    pub created_at: DateTime<Utc>,
}

impl ScopeInfo {
    /// 创建根作用域信息
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            scope_type: ScopeType::Root,
            created_at: Utc::now(),
        }
    }

    /// 创建子作用域信息
    pub fn child(&self) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name: format!("{}.{}", self.name, &id.simple().to_string()[..8]),
            scope_type: ScopeType::Child,
            created_at: Utc::now(),
        }
    }
}

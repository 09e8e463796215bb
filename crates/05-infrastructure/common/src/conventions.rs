//! 组件键约定
//!
//! 组件键与别名共享同一个命名空间：键会被去除首尾空白，不能为空，也不能使用保留键。

use crate::errors::{DependencyError, DependencyResult};
use std::collections::HashSet;

/// 保留键
pub struct ReservedKeys;

impl ReservedKeys {
    /// 解析为当前作用域本身的服务定位器键
    pub const SERVICE_LOCATOR: &'static str = "serviceLocator";

    /// 是否为保留键
    pub fn is_reserved(key: &str) -> bool {
        key.trim() == Self::SERVICE_LOCATOR
    }
}

/// 规范化查找用的键，只检查非空
pub fn normalize_key(key: &str) -> DependencyResult<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(DependencyError::validation("键不能为空"));
    }
    Ok(key)
}

/// 规范化注册用的键，额外拒绝保留键
pub fn normalize_registration_key(key: &str) -> DependencyResult<String> {
    let key = normalize_key(key)?;
    if ReservedKeys::is_reserved(key) {
        return Err(DependencyError::validation(format!(
            "'{}' 是保留键，不能用于注册",
            key
        )));
    }
    Ok(key.to_string())
}

/// 规范化别名列表
///
/// 别名不能为空、不能等于主键、不能重复，也不能使用保留键。
pub fn normalize_aliases<S: AsRef<str>>(key: &str, aliases: &[S]) -> DependencyResult<Vec<String>> {
    let mut seen = HashSet::with_capacity(aliases.len());
    let mut normalized = Vec::with_capacity(aliases.len());

    for alias in aliases {
        let alias = normalize_registration_key(alias.as_ref())
            .map_err(|e| DependencyError::validation(format!("别名无效: {}", e)))?;
        if alias == key {
            return Err(DependencyError::validation(format!(
                "别名 '{}' 不能与键相同",
                alias
            )));
        }
        if !seen.insert(alias.clone()) {
            return Err(DependencyError::validation(format!(
                "别名 '{}' 重复",
                alias
            )));
        }
        normalized.push(alias);
    }

    Ok(normalized)
}

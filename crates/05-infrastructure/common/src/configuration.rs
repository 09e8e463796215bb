//! 容器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 容器配置
///
/// 可以直接构造，也可以从 TOML / JSON 文本加载，缺省字段使用默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 容器名称，作为根作用域名称出现在日志中
    pub name: String,
    /// 构造组件时的最大递归深度
    pub max_resolution_depth: usize,
    /// 注册表查找未命中时是否输出诊断日志
    pub log_lookup_misses: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "root".to_string(),
            max_resolution_depth: 100,
            log_lookup_misses: true,
        }
    }
}

impl ContainerConfig {
    /// 从 TOML 文本加载
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文本加载
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 设置容器名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// 设置是否记录查找未命中
    pub fn with_log_lookup_misses(mut self, enabled: bool) -> Self {
        self.log_lookup_misses = enabled;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "name 不能为空".to_string(),
            });
        }
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

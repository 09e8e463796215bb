//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    #[error("日志初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 依赖注入错误类型
///
/// 除组件释放失败外，所有错误都会立即返回给调用方，容器内部不做重试。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("参数无效: {message}")]
    Validation { message: String },

    #[error("重复注册: '{key}'")]
    DuplicateRegistration { key: String },

    #[error("组件未注册: '{key}'")]
    ComponentNotRegistered { key: String },

    #[error("检测到未注册的依赖: '{key}'")]
    UnregisteredDependency { key: String },

    #[error("组件 '{component}' 的依赖 '{dependency}' 未注册")]
    DependencyNotRegistered { dependency: String, component: String },

    #[error("检测到循环依赖: '{key}'")]
    CircularDependency { key: String },

    #[error("生命周期不兼容: {message}")]
    IncompatibleLifecycle { message: String },

    #[error("无效操作: {operation}")]
    InvalidOperation { operation: String },

    #[error("对象已释放: {object}")]
    ObjectDisposed { object: String },

    #[error("组件创建失败: '{key}', 原因: {source}")]
    ComponentCreationFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("组件 '{component}' 的构造参数 {index} 不存在")]
    ArgumentOutOfRange { component: String, index: usize },

    #[error("组件 '{key}' 类型不匹配, 期望 {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("解析 '{key}' 时超过最大解析深度 {max_depth}")]
    ResolutionDepthExceeded { key: String, max_depth: usize },
}

impl DependencyError {
    /// 创建参数验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// 创建无效操作错误
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.into(),
        }
    }

    /// 创建对象已释放错误
    pub fn object_disposed(object: impl Into<String>) -> Self {
        Self::ObjectDisposed {
            object: object.into(),
        }
    }

    /// 创建组件构造失败错误
    pub fn creation_failed(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;

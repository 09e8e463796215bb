//! 组件注册信息

use di_abstractions::ComponentProvider;
use infrastructure_common::{
    normalize_aliases, normalize_key, normalize_registration_key, DependencyError,
    DependencyResult, Instance, Lifestyle,
};
use tokio::sync::OnceCell;
use tracing::{debug, error};

/// 组件注册信息
///
/// 注册后不可变。依赖列表在构造时从组件提供者读取一次，其顺序即构造参数顺序。
pub struct ComponentRegistration {
    key: String,
    provider: ComponentProvider,
    lifestyle: Lifestyle,
    aliases: Vec<String>,
    dependencies: Vec<String>,
    disposal: OnceCell<()>,
}

impl ComponentRegistration {
    /// 创建注册信息
    pub fn new<S: AsRef<str>>(
        key: &str,
        provider: ComponentProvider,
        lifestyle: Lifestyle,
        aliases: &[S],
    ) -> DependencyResult<Self> {
        let key = normalize_registration_key(key)?;

        match (lifestyle, provider.is_instance()) {
            (Lifestyle::Instance, false) => {
                return Err(DependencyError::validation(format!(
                    "组件 '{}' 使用 Instance 生命周期时必须提供现成实例",
                    key
                )));
            }
            (Lifestyle::Transient | Lifestyle::Scoped | Lifestyle::Singleton, true) => {
                return Err(DependencyError::validation(format!(
                    "组件 '{}' 提供的是现成实例，只能使用 Instance 生命周期",
                    key
                )));
            }
            _ => {}
        }

        let aliases = normalize_aliases(&key, aliases)?;
        let dependencies = provider
            .dependencies()
            .iter()
            .map(|dependency| {
                normalize_key(dependency).map(str::to_string).map_err(|_| {
                    DependencyError::validation(format!("组件 '{}' 声明了空的依赖键", key))
                })
            })
            .collect::<DependencyResult<Vec<_>>>()?;

        Ok(Self {
            key,
            provider,
            lifestyle,
            aliases,
            dependencies,
            disposal: OnceCell::new(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lifestyle(&self) -> Lifestyle {
        self.lifestyle
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn provider(&self) -> &ComponentProvider {
        &self.provider
    }

    pub fn is_instance(&self) -> bool {
        self.lifestyle == Lifestyle::Instance
    }

    /// 组件类型名称
    pub fn type_name(&self) -> &'static str {
        self.provider.type_name()
    }

    /// 键或任一别名是否等于 `name`
    pub fn matches(&self, name: &str) -> bool {
        self.key == name || self.aliases.iter().any(|alias| alias == name)
    }

    /// 主键与所有别名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// 现成实例（仅 Instance 生命周期）
    pub fn instance(&self) -> Option<Instance> {
        match &self.provider {
            ComponentProvider::Instance { instance, .. } => Some(instance.clone()),
            ComponentProvider::Factory { .. } => None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposal.initialized()
    }

    /// 释放注册的组件
    ///
    /// 幂等，并发调用共享同一次释放。只有现成实例由注册信息释放，容器构造的实例由
    /// 缓存它的作用域释放。释放失败只记录日志。
    pub async fn dispose(&self) {
        self.disposal
            .get_or_init(|| async {
                let Some(instance) = self.instance() else {
                    return;
                };
                debug!("释放组件实例: {}", self.key);
                if let Err(e) = instance.dispose().await {
                    error!("释放组件 '{}' 失败: {}", self.key, e);
                }
            })
            .await;
    }
}

impl std::fmt::Debug for ComponentRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistration")
            .field("key", &self.key)
            .field("lifestyle", &self.lifestyle)
            .field("aliases", &self.aliases)
            .field("dependencies", &self.dependencies)
            .field("provider", &self.provider)
            .finish()
    }
}

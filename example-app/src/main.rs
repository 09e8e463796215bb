//! # 示例应用程序
//!
//! 演示容器的注册、验证、作用域解析与释放流程

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use component_macros::{Component, Injectable};
use di_abstractions::{ComponentInstaller, Registry, ServiceLocator};
use di_impl::{Container, ScopeHandle};
use infrastructure_common::{
    Component, ContainerConfig, DependencyResult, DisposeError, LoggingConfig,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 容器配置文件路径（.toml 或 .json）
    #[arg(short, long)]
    config: Option<String>,

    /// 模拟处理的请求数量
    #[arg(short, long, default_value_t = 3)]
    requests: usize,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

#[derive(Component, Injectable)]
struct Clock;

/// 数据库连接池，容器释放时关闭
#[derive(Injectable)]
#[inject("clock")]
struct ConnectionPool {
    clock: Arc<Clock>,
}

#[async_trait]
impl Component for ConnectionPool {
    async fn dispose(&self) -> Result<(), DisposeError> {
        info!("关闭连接池");
        Ok(())
    }
}

/// 请求级事务，作用域释放时提交
#[derive(Injectable)]
#[inject("pool")]
struct Transaction {
    pool: Arc<ConnectionPool>,
}

#[async_trait]
impl Component for Transaction {
    async fn dispose(&self) -> Result<(), DisposeError> {
        Err("事务提交超时".into())
    }
}

#[derive(Component, Injectable)]
#[inject("tx", "counter")]
struct OrderHandler {
    transaction: Arc<Transaction>,
    counter: Arc<RequestCounter>,
}

impl OrderHandler {
    fn handle(&self, order: usize) {
        let handled = self.counter.0.fetch_add(1, Ordering::SeqCst) + 1;
        info!(order, handled, "处理订单");
    }
}

#[derive(Default)]
struct RequestCounter(AtomicUsize);

impl Component for RequestCounter {}

/// 每个请求在独立的子作用域中处理
#[derive(Component, Injectable)]
#[inject("serviceLocator")]
struct RequestDispatcher {
    locator: Arc<ScopeHandle>,
}

impl RequestDispatcher {
    async fn dispatch(&self, order: usize) -> DependencyResult<()> {
        let scope = self.locator.create_scope()?;
        let handler = scope.resolve::<OrderHandler>("orderHandler")?;
        handler.handle(order);
        scope.dispose().await;
        Ok(())
    }
}

/// 订单模块安装器
struct OrderInstaller {
    counter: Arc<RequestCounter>,
}

impl ComponentInstaller for OrderInstaller {
    fn install(&self, registry: &mut dyn Registry) -> DependencyResult<()> {
        registry
            .register_singleton::<Clock>("clock", &[])?
            .register_singleton::<ConnectionPool>("pool", &["database"])?
            .register_scoped::<Transaction>("transaction", &["tx"])?
            .register_transient::<OrderHandler>("orderHandler", &[])?
            .register_singleton::<RequestDispatcher>("dispatcher", &[])?
            .register_instance("counter", Arc::clone(&self.counter), &[])?;
        Ok(())
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ContainerConfig> {
    let Some(path) = path else {
        return Ok(ContainerConfig::default().with_name("example"));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {}", path))?;
    let config = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("json") => ContainerConfig::from_json_str(&text)?,
        _ => ContainerConfig::from_toml_str(&text)?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.json_logs {
        LoggingConfig::production()
    } else {
        LoggingConfig::development()
    };
    logging.init()?;

    let config = load_config(args.config.as_deref())?;
    info!("启动 Lorn IoC 示例应用, 容器: {}", config.name);

    let counter = Arc::new(RequestCounter::default());
    let mut container = Container::with_config(config)?;
    container.install(&OrderInstaller {
        counter: Arc::clone(&counter),
    })?;
    container.bootstrap()?;

    let dispatcher = container.resolve::<RequestDispatcher>("dispatcher")?;
    for order in 1..=args.requests {
        dispatcher.dispatch(order).await?;
    }

    if let Err(e) = container.resolve::<Transaction>("tx") {
        warn!("根作用域不能解析作用域组件: {}", e);
    }

    container.dispose().await;
    info!(
        "应用已关闭, 共处理 {} 个请求",
        counter.0.load(Ordering::SeqCst)
    );
    Ok(())
}

//! 日志初始化模块
//!
//! 基于 tracing-subscriber 提供结构化日志，支持 JSON 和 pretty 两种输出格式，
//! 日志级别可通过 RUST_LOG 环境变量或配置文件控制。

use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ObservabilityConfig;

/// 初始化全局日志订阅器
///
/// 环境变量 RUST_LOG 优先于配置文件中的 log_level。
/// 重复初始化会返回错误，应只在服务入口调用一次。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_not_reentrant() {
        let config = ObservabilityConfig::default();
        let first = init(&config);
        let second = init(&config);
        // 只允许一个全局订阅器
        assert!(first.is_ok() || second.is_err());
    }
}

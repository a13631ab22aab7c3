//! 日志初始化
//!
//! 安装 `tracing-subscriber` 的 fmt 输出，过滤规则取自 `RUST_LOG`，
//! 未设置时为 `info`。同时把 `log` crate 的记录桥接到 `tracing`，
//! 使用 `log` 的 IK 求解器 / 碰撞库输出也会出现在同一日志流中。
//!
//! ```bash
//! RUST_LOG=lintrail_planner=debug cargo run --example cartesian_demo --features mock
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// 默认过滤规则
pub const DEFAULT_FILTER: &str = "info";

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Global subscriber already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to bridge log records: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

/// 初始化日志（重复调用时静默忽略）
pub fn init() {
    if let Err(e) = try_init(DEFAULT_FILTER) {
        tracing::debug!("Logging already initialized: {}", e);
    }
}

/// 以 `default_filter` 为默认规则初始化日志（`RUST_LOG` 优先）
pub fn try_init(default_filter: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        // RUST_LOG 未设置时才会解析默认规则
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(try_init("lintrail=verbose"), Err(LoggingError::Filter(_))));
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        log::info!("bridged log record");
        tracing::info!("tracing record");
    }
}

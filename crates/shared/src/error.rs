//! 共享错误类型
//!
//! 基础设施层（配置、数据库）的错误定义，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 共享 Result 类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

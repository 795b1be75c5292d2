//! 共享库
//!
//! 包含各服务共用的配置、错误处理、数据库连接、日志初始化、限流等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod rate_limit;
pub mod test_utils;

pub use config::AppConfig;
pub use database::Database;
pub use error::{Result, SharedError};
pub use rate_limit::{InMemoryRateLimitStore, RateLimit, RateLimitStore, RateLimiter};

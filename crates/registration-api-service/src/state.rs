//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use registration::repository::{AttendeeRepository, CheckInRepository, EventRepository};
use registration::service::{CheckInService, EventService, QueryService, RegistrationService};
use registration_shared::config::RateLimitConfig;
use registration_shared::rate_limit::RateLimiter;

/// 具体仓储类型的服务别名
pub type Registration = RegistrationService<EventRepository, AttendeeRepository>;
pub type CheckIn = CheckInService<AttendeeRepository, CheckInRepository>;
pub type Query = QueryService<EventRepository, AttendeeRepository, CheckInRepository>;
pub type Events = EventService<EventRepository>;

/// Axum 应用共享状态
///
/// 包含数据库连接池、限流器和各业务服务，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池（统计/导出等聚合查询直接使用）
    pub pool: PgPool,
    /// 限流器
    pub rate_limiter: RateLimiter,
    /// 限流配额配置
    pub rate_limit: RateLimitConfig,
    /// 允许的请求来源（空表示不校验）
    pub allowed_origins: Arc<Vec<String>>,
    /// 部署环境（development / production）
    pub environment: String,
    pub registration: Arc<Registration>,
    pub checkin: Arc<CheckIn>,
    pub query: Arc<Query>,
    pub events: Arc<Events>,
}

impl AppState {
    /// 创建新的应用状态，装配仓储与服务
    pub fn new(
        pool: PgPool,
        rate_limiter: RateLimiter,
        rate_limit: RateLimitConfig,
        allowed_origins: Vec<String>,
        environment: String,
    ) -> Self {
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let attendee_repo = Arc::new(AttendeeRepository::new(pool.clone()));
        let check_in_repo = Arc::new(CheckInRepository::new(pool.clone()));

        Self {
            registration: Arc::new(RegistrationService::new(
                event_repo.clone(),
                attendee_repo.clone(),
            )),
            checkin: Arc::new(CheckInService::new(
                attendee_repo.clone(),
                check_in_repo.clone(),
            )),
            query: Arc::new(QueryService::new(
                event_repo.clone(),
                attendee_repo,
                check_in_repo,
            )),
            events: Arc::new(EventService::new(event_repo)),
            pool,
            rate_limiter,
            rate_limit,
            allowed_origins: Arc::new(allowed_origins),
            environment,
        }
    }
}

//! 活动报名与签到 REST API 服务入口

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use registration_api::routes;
use registration_api::state::AppState;
use registration_shared::{config::AppConfig, database::Database, observability, rate_limit::RateLimiter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/registration-api.toml + REG_ 前缀环境变量覆盖
    let config = AppConfig::load("registration-api").unwrap_or_default();

    observability::init(&config.observability)?;

    info!("Starting registration-api on {}", config.server_addr());

    let db = Database::connect(&config.database).await?;

    // 来源白名单：通过 REG_ALLOWED_ORIGINS 环境变量控制，空表示不校验
    let allowed_origins: Vec<String> = std::env::var("REG_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let state = AppState::new(
        db.pool().clone(),
        RateLimiter::in_memory(),
        config.rate_limit.clone(),
        allowed_origins,
        config.environment.clone(),
    );

    // CORS 配置：通过 REG_CORS_ORIGINS 环境变量控制允许的来源
    // 默认允许本地开发地址，生产环境应设置为实际域名
    let cors_origins = std::env::var("REG_CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    let cors = if cors_origins == "*" {
        // 生产环境使用通配符 CORS 是安全隐患
        if config.is_production() {
            warn!("REG_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .split(',')
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = routes::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("registration-api listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

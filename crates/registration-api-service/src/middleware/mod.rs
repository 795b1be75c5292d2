//! HTTP 中间件

mod rate_limit;
mod request_validation;

pub use rate_limit::rate_limit_middleware;
pub use request_validation::request_validation_middleware;

//! 活动报名与签到 REST API 服务
//!
//! 提供报名表单、扫码签到、管理端看板所需的 REST API。
//!
//! ## 核心功能
//!
//! - **报名**：公开报名接口，返回胸牌号与二维码载荷
//! - **签到**：按胸牌号或扫码载荷签到（餐食/物料/普通）
//! - **查询**：胸牌档案、参会者搜索
//! - **管理端**：参会者分页/更新/删除、活动管理、统计看板、CSV 导出
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 限流与请求来源校验中间件
//! - `routes`: 路由配置
//! - `state`: 应用状态
//! - `validation`: 输入清洗与格式校验
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::ApiError;
pub use state::AppState;

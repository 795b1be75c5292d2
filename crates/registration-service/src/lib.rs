//! 活动报名与签到核心服务
//!
//! 提供参会者报名、胸牌签到、查询统计的领域逻辑。
//!
//! ## 核心功能
//!
//! - **胸牌号生成**：REG 前缀 + 时间戳 + 随机后缀，唯一性由存储约束兜底
//! - **二维码载荷编解码**：胸牌二维码的结构化文本载荷，扫码输入视为不可信数据
//! - **签到规则引擎**：按签到类型校验权益并幂等记录，(参会者, 类型) 至多一条
//! - **报名**：活动校验、重复报名拦截、胸牌号冲突重试
//! - **查询**：按胸牌查档案（含签到历史）、搜索、管理端分页/更新/删除
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `badge`: 胸牌号生成与校验
//! - `qr`: 二维码载荷编解码
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层

pub mod badge;
pub mod error;
pub mod models;
pub mod qr;
pub mod repository;
pub mod service;

pub use badge::{generate_badge_uid, is_valid_badge_uid};
pub use error::{RegistrationError, Result};
pub use models::*;
pub use qr::{BadgePayload, decode_badge_payload, encode_badge_payload, is_valid_payload};
pub use repository::{
    AttendeeRepository, AttendeeRepositoryTrait, CheckInRepository, CheckInRepositoryTrait,
    EventRepository, EventRepositoryTrait,
};
pub use service::{CheckInService, EventService, QueryService, RegistrationService, dto};

//! 签到服务
//!
//! 签到状态机：每个 (参会者, 签到类型) 只有 未签到 -> 已签到 一条转移，
//! 已签到为终态（不存在取消签到）。
//!
//! ## 签到流程
//!
//! 1. 胸牌查找 -> 2. 权益校验 -> 3. 存在性预检 -> 4. 原子插入
//!
//! 第 3 步是快路径；第 4 步的唯一约束插入才是裁决点，
//! 并发的同类型重复签到在这里收敛为恰好一次成功。

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{RegistrationError, Result};
use crate::models::NewCheckIn;
use crate::repository::{AttendeeRepositoryTrait, CheckInRepositoryTrait};
use crate::service::dto::{CheckInRequest, CheckInResponse};

/// 签到服务
pub struct CheckInService<AR, CR>
where
    AR: AttendeeRepositoryTrait,
    CR: CheckInRepositoryTrait,
{
    attendee_repo: Arc<AR>,
    check_in_repo: Arc<CR>,
}

impl<AR, CR> CheckInService<AR, CR>
where
    AR: AttendeeRepositoryTrait,
    CR: CheckInRepositoryTrait,
{
    pub fn new(attendee_repo: Arc<AR>, check_in_repo: Arc<CR>) -> Self {
        Self {
            attendee_repo,
            check_in_repo,
        }
    }

    /// 执行一次签到
    #[instrument(skip_all, fields(badge_uid = %req.badge_uid, check_in_type = %req.check_in_type))]
    pub async fn check_in(&self, req: CheckInRequest) -> Result<CheckInResponse> {
        // 1. 胸牌查找
        let attendee = self
            .attendee_repo
            .find_by_badge_uid(&req.badge_uid)
            .await?
            .ok_or_else(|| RegistrationError::AttendeeNotFound(req.badge_uid.clone()))?;

        // 2. 权益校验（meal/kit 受权益开关控制，general 无门槛）
        if !attendee.is_entitled(req.check_in_type) {
            return Err(RegistrationError::NotEntitled {
                check_in_type: req.check_in_type,
            });
        }

        // 3. 存在性预检：快路径拦截明显的重复扫码
        if self
            .check_in_repo
            .find_by_attendee_and_type(attendee.id, req.check_in_type)
            .await?
            .is_some()
        {
            return Err(RegistrationError::AlreadyCheckedIn {
                check_in_type: req.check_in_type,
            });
        }

        // 4. 原子插入；并发重复在唯一约束处收敛，拿不到返回行即判重
        let new = NewCheckIn::new(
            attendee.id,
            req.check_in_type,
            req.checked_in_by,
            req.location,
            req.notes,
        );

        let Some(check_in) = self.check_in_repo.insert(&new).await? else {
            return Err(RegistrationError::AlreadyCheckedIn {
                check_in_type: req.check_in_type,
            });
        };

        info!(
            attendee_name = %attendee.full_name,
            checked_in_by = %check_in.checked_in_by,
            location = %check_in.location,
            "Check-in successful"
        );

        Ok(CheckInResponse {
            attendee_name: attendee.full_name,
            check_in_type: check_in.check_in_type,
            checked_in_at: check_in.checked_in_at,
        })
    }
}

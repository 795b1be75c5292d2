//! 报名服务
//!
//! 处理参会者报名的核心业务逻辑：
//! - 活动存在性校验
//! - 重复报名拦截（同活动同邮箱）
//! - 胸牌号生成与冲突重试
//!
//! ## 报名流程
//!
//! 1. 活动校验 -> 2. 重复报名预检 -> 3. 生成胸牌号 -> 4. 插入（冲突换号重试）
//!
//! 第 2 步只是快路径，真正的裁决在第 4 步的唯一约束：
//! 并发的同邮箱报名只有一个插入成功，其余映射为 DuplicateRegistration。

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::badge::generate_badge_uid;
use crate::error::{RegistrationError, Result};
use crate::models::{NewAttendee, DEFAULT_BADGE_TEMPLATE};
use crate::repository::{AttendeeRepositoryTrait, EventRepositoryTrait};
use crate::service::dto::{RegistrationRequest, RegistrationResponse};

/// 胸牌号冲突时的最大重试次数
///
/// 时间戳 + 6 位随机后缀的碰撞概率很低，连续碰撞说明随机源异常，不再无限重试
const MAX_BADGE_UID_ATTEMPTS: u32 = 3;

/// 报名服务
pub struct RegistrationService<ER, AR>
where
    ER: EventRepositoryTrait,
    AR: AttendeeRepositoryTrait,
{
    event_repo: Arc<ER>,
    attendee_repo: Arc<AR>,
}

impl<ER, AR> RegistrationService<ER, AR>
where
    ER: EventRepositoryTrait,
    AR: AttendeeRepositoryTrait,
{
    pub fn new(event_repo: Arc<ER>, attendee_repo: Arc<AR>) -> Self {
        Self {
            event_repo,
            attendee_repo,
        }
    }

    /// 报名参会者
    #[instrument(skip_all, fields(event_id = req.event_id))]
    pub async fn register(&self, req: RegistrationRequest) -> Result<RegistrationResponse> {
        // 1. 活动必须存在
        let event = self
            .event_repo
            .find_by_id(req.event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound(req.event_id))?;

        // 2. 重复报名预检（快路径，唯一索引仍会兜底）
        if let Some(email) = &req.email {
            if self
                .attendee_repo
                .find_by_event_and_email(req.event_id, email)
                .await?
                .is_some()
            {
                return Err(RegistrationError::DuplicateRegistration {
                    event_id: req.event_id,
                    email: email.clone(),
                });
            }
        }

        // 3/4. 生成胸牌号并插入，碰撞时换号重试
        for attempt in 1..=MAX_BADGE_UID_ATTEMPTS {
            let badge_uid = generate_badge_uid();
            let new = NewAttendee {
                event_id: req.event_id,
                badge_uid,
                full_name: req.full_name.clone(),
                email: req.email.clone(),
                phone: req.phone.clone(),
                category: req.category.clone(),
                institution: req.institution.clone(),
                meal_entitled: req.meal_entitled,
                kit_entitled: req.kit_entitled,
                badge_print_template: Some(DEFAULT_BADGE_TEMPLATE.to_string()),
                notes: req.notes.clone(),
            };

            match self.attendee_repo.create(&new).await {
                Ok(attendee) => {
                    info!(
                        badge_uid = %attendee.badge_uid,
                        event_name = %event.event_name,
                        "Attendee registered"
                    );
                    return Ok(RegistrationResponse {
                        badge_uid: attendee.badge_uid,
                        attendee_name: attendee.full_name,
                        event_name: event.event_name,
                    });
                }
                Err(RegistrationError::BadgeUidConflict(badge_uid)) => {
                    warn!(attempt, badge_uid = %badge_uid, "Badge uid collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(RegistrationError::Internal(format!(
            "badge uid generation exhausted {} attempts",
            MAX_BADGE_UID_ATTEMPTS
        )))
    }
}

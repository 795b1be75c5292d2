//! 报名签到流程集成测试
//!
//! 使用真实 PostgreSQL 测试报名、签到的完整业务流程。
//! 并发判重依赖唯一约束，无法通过纯 mock 覆盖，因此需要集成测试。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... \
//!   cargo test --test checkin_flow_test -- --ignored
//! ```
//!
//! 依赖 migrations/0001_init.sql 已应用的数据库。

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use registration::error::RegistrationError;
use registration::models::{AttendeeListFilter, CheckInType};
use registration::repository::{AttendeeRepository, CheckInRepository, EventRepository};
use registration::service::dto::{CheckInRequest, RegistrationRequest};
use registration::service::{CheckInService, QueryService, RegistrationService};
use registration_shared::test_utils::{test_email, test_event_code, test_full_name};

// ==================== 辅助函数 ====================

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

async fn connect() -> PgPool {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url())
        .await
        .expect("连接数据库失败")
}

fn registration_service(
    pool: &PgPool,
) -> RegistrationService<EventRepository, AttendeeRepository> {
    RegistrationService::new(
        Arc::new(EventRepository::new(pool.clone())),
        Arc::new(AttendeeRepository::new(pool.clone())),
    )
}

fn checkin_service(pool: &PgPool) -> CheckInService<AttendeeRepository, CheckInRepository> {
    CheckInService::new(
        Arc::new(AttendeeRepository::new(pool.clone())),
        Arc::new(CheckInRepository::new(pool.clone())),
    )
}

fn query_service(
    pool: &PgPool,
) -> QueryService<EventRepository, AttendeeRepository, CheckInRepository> {
    QueryService::new(
        Arc::new(EventRepository::new(pool.clone())),
        Arc::new(AttendeeRepository::new(pool.clone())),
        Arc::new(CheckInRepository::new(pool.clone())),
    )
}

/// 插入测试活动，返回活动 ID
async fn seed_test_event(pool: &PgPool) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO events (event_code, event_name, event_date)
        VALUES ($1, 'Integration Test Conference', $2)
        RETURNING id
        "#,
    )
    .bind(test_event_code())
    .bind(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    .fetch_one(pool)
    .await
    .expect("插入测试活动失败")
}

/// 报名一个参会者，返回胸牌号
async fn seed_attendee(pool: &PgPool, event_id: i64, meal: bool, kit: bool) -> String {
    let service = registration_service(pool);
    let resp = service
        .register(RegistrationRequest {
            event_id,
            full_name: test_full_name(),
            email: Some(test_email()),
            phone: Some("+15550100".to_string()),
            category: "delegate".to_string(),
            institution: Some("Integration Hospital".to_string()),
            meal_entitled: meal,
            kit_entitled: kit,
            notes: None,
        })
        .await
        .expect("报名失败");
    resp.badge_uid
}

fn checkin_request(badge_uid: &str, t: CheckInType) -> CheckInRequest {
    CheckInRequest {
        badge_uid: badge_uid.to_string(),
        check_in_type: t,
        checked_in_by: Some("staff-01".to_string()),
        location: Some("hall-a".to_string()),
        notes: None,
    }
}

// ==================== 测试用例 ====================

#[tokio::test]
#[ignore] // 需要数据库
async fn test_registration_returns_unique_badges() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;

    let a = seed_attendee(&pool, event_id, true, true).await;
    let b = seed_attendee(&pool, event_id, true, true).await;

    assert_ne!(a, b, "不同参会者的胸牌号应该唯一");
    assert!(a.starts_with("REG"));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_duplicate_email_rejected() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    let email = test_email();

    let service = registration_service(&pool);
    let request = RegistrationRequest {
        event_id,
        full_name: test_full_name(),
        email: Some(email.clone()),
        phone: None,
        category: "delegate".to_string(),
        institution: None,
        meal_entitled: false,
        kit_entitled: false,
        notes: None,
    };

    service.register(request.clone()).await.expect("首次报名应成功");
    let err = service.register(request).await.unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::DuplicateRegistration { .. }
    ));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_concurrent_registrations_with_same_email() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    let email = test_email();

    let make_request = || RegistrationRequest {
        event_id,
        full_name: test_full_name(),
        email: Some(email.clone()),
        phone: None,
        category: "delegate".to_string(),
        institution: None,
        meal_entitled: false,
        kit_entitled: false,
        notes: None,
    };

    let service_a = registration_service(&pool);
    let service_b = registration_service(&pool);
    let (a, b) = tokio::join!(
        service_a.register(make_request()),
        service_b.register(make_request())
    );

    // 并发同邮箱报名恰好一个成功
    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "并发重复报名应只有一个成功: a={:?}, b={:?}",
        a.map(|r| r.badge_uid),
        b.map(|r| r.badge_uid)
    );
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_full_checkin_scenario() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    // meal_entitled=true, kit_entitled=false
    let badge_uid = seed_attendee(&pool, event_id, true, false).await;

    let service = checkin_service(&pool);

    // kit 无权益
    let err = service
        .check_in(checkin_request(&badge_uid, CheckInType::Kit))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::NotEntitled {
            check_in_type: CheckInType::Kit
        }
    ));

    // meal 首次成功
    let resp = service
        .check_in(checkin_request(&badge_uid, CheckInType::Meal))
        .await
        .expect("首次 meal 签到应成功");
    assert_eq!(resp.check_in_type, CheckInType::Meal);

    // meal 重复判重
    let err = service
        .check_in(checkin_request(&badge_uid, CheckInType::Meal))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::AlreadyCheckedIn {
            check_in_type: CheckInType::Meal
        }
    ));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_concurrent_checkins_converge_to_one_success() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    let badge_uid = seed_attendee(&pool, event_id, true, false).await;

    let service_a = checkin_service(&pool);
    let service_b = checkin_service(&pool);
    let (a, b) = tokio::join!(
        service_a.check_in(checkin_request(&badge_uid, CheckInType::Meal)),
        service_b.check_in(checkin_request(&badge_uid, CheckInType::Meal))
    );

    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "并发同类型签到应恰好一个成功"
    );

    // 不变量：该 (参会者, 类型) 只有一条签到记录
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM check_ins ci
        JOIN attendees a ON a.id = ci.attendee_id
        WHERE a.badge_uid = $1 AND ci.check_in_type = 'meal'
        "#,
    )
    .bind(&badge_uid)
    .fetch_one(&pool)
    .await
    .expect("统计签到记录失败");
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_lookup_returns_history_and_deletion_cascades() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    let badge_uid = seed_attendee(&pool, event_id, true, true).await;

    let checkin = checkin_service(&pool);
    checkin
        .check_in(checkin_request(&badge_uid, CheckInType::General))
        .await
        .expect("general 签到应成功");
    checkin
        .check_in(checkin_request(&badge_uid, CheckInType::Meal))
        .await
        .expect("meal 签到应成功");

    let query = query_service(&pool);
    let profile = query.lookup_by_badge(&badge_uid).await.expect("档案查询失败");
    assert_eq!(profile.check_ins.len(), 2);
    assert!(profile.event.is_some());

    // 删除参会者后签到记录级联清理
    query
        .delete_attendee(profile.attendee.id)
        .await
        .expect("删除参会者失败");

    let orphan_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM check_ins WHERE attendee_id = $1")
            .bind(profile.attendee.id)
            .fetch_one(&pool)
            .await
            .expect("统计签到记录失败");
    assert_eq!(orphan_count, 0, "签到记录应随参会者级联删除");
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_admin_list_filters_by_event() {
    let pool = connect().await;
    let event_id = seed_test_event(&pool).await;
    seed_attendee(&pool, event_id, true, false).await;
    seed_attendee(&pool, event_id, false, true).await;

    let query = query_service(&pool);
    let page = query
        .list_attendees(&AttendeeListFilter {
            event_id: Some(event_id),
            search: None,
            limit: 10,
            offset: 0,
        })
        .await
        .expect("列表查询失败");

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|i| i.attendee.event_id == event_id));
}

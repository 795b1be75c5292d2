//! 固定窗口限流模块
//!
//! 以固定时间窗口计数的方式限制单个客户端的请求频率。计数存储抽象为
//! `RateLimitStore` 接口，默认提供进程内 DashMap 实现；多实例部署时可替换为
//! Redis INCR + EXPIRE 的分布式实现，接口语义不变。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::error::Result;

/// 单条限流规则：窗口内允许的最大请求数
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    pub max_requests: i64,
    /// 时间窗口（秒）
    pub window_secs: u64,
}

/// 限流判定结果
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// 窗口内剩余配额
    pub remaining: i64,
}

/// 限流计数存储接口
///
/// 实现方负责固定窗口语义：同一 key 在窗口内计数累加，窗口结束后归零。
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// 递增 key 在当前窗口内的计数，返回递增后的计数值
    async fn incr(&self, key: &str, window_secs: u64) -> Result<i64>;
}

/// 窗口计数器
///
/// 不同接口级别共用一个存储，窗口长度跟着计数器各自记录
struct CounterWindow {
    count: i64,
    /// 窗口起始时间（epoch 秒）
    window_start: i64,
    window_secs: u64,
}

/// 进程内限流计数存储
///
/// 过期窗口按次数触发惰性清理，避免每次请求全表扫描。
pub struct InMemoryRateLimitStore {
    counters: DashMap<String, CounterWindow>,
    incr_calls: AtomicU64,
}

/// 每隔多少次递增触发一次过期清理
const PURGE_INTERVAL: u64 = 1024;

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
            incr_calls: AtomicU64::new(0),
        }
    }

    /// 在指定时间点递增（测试用，生产路径经由 trait 方法取当前时间）
    fn incr_at(&self, key: &str, window_secs: u64, now: i64) -> i64 {
        let mut entry = self
            .counters
            .entry(key.to_string())
            .or_insert(CounterWindow {
                count: 0,
                window_start: now,
                window_secs,
            });

        if now >= entry.window_start + entry.window_secs as i64 {
            entry.count = 0;
            entry.window_start = now;
            entry.window_secs = window_secs;
        }

        entry.count += 1;
        entry.count
    }

    /// 清理窗口已结束的计数器
    fn purge_expired(&self, now: i64) {
        self.counters
            .retain(|_, w| now < w.window_start + w.window_secs as i64);
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn incr(&self, key: &str, window_secs: u64) -> Result<i64> {
        let now = Utc::now().timestamp();

        let calls = self.incr_calls.fetch_add(1, Ordering::Relaxed);
        if calls % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.purge_expired(now);
        }

        Ok(self.incr_at(key, window_secs, now))
    }
}

/// 限流器
///
/// 持有计数存储并执行配额判定，按 key 区分客户端。
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// 创建使用进程内计数存储的限流器
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRateLimitStore::new()))
    }

    /// 判定一次请求是否放行
    pub async fn check(&self, key: &str, limit: RateLimit) -> Result<RateLimitDecision> {
        let count = self.store.incr(key, limit.window_secs).await?;
        Ok(RateLimitDecision {
            allowed: count <= limit.max_requests,
            remaining: (limit.max_requests - count).max(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_within_window() {
        let store = InMemoryRateLimitStore::new();
        assert_eq!(store.incr_at("client-1", 60, 1000), 1);
        assert_eq!(store.incr_at("client-1", 60, 1010), 2);
        assert_eq!(store.incr_at("client-1", 60, 1059), 3);
    }

    #[test]
    fn test_window_rollover_resets_count() {
        let store = InMemoryRateLimitStore::new();
        assert_eq!(store.incr_at("client-1", 60, 1000), 1);
        assert_eq!(store.incr_at("client-1", 60, 1030), 2);
        // 窗口结束后计数归零
        assert_eq!(store.incr_at("client-1", 60, 1060), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new();
        assert_eq!(store.incr_at("client-1", 60, 1000), 1);
        assert_eq!(store.incr_at("client-2", 60, 1000), 1);
        assert_eq!(store.incr_at("client-1", 60, 1001), 2);
    }

    #[test]
    fn test_purge_removes_expired_windows() {
        let store = InMemoryRateLimitStore::new();
        store.incr_at("old", 60, 1000);
        store.incr_at("fresh", 60, 2000);
        store.purge_expired(2010);
        assert!(!store.counters.contains_key("old"));
        assert!(store.counters.contains_key("fresh"));
    }

    #[test]
    fn test_purge_respects_per_key_window() {
        // 长窗口计数器不被短窗口的清理误删
        let store = InMemoryRateLimitStore::new();
        store.incr_at("registration", 900, 1000);
        store.incr_at("checkin", 60, 1000);
        store.purge_expired(1100);
        assert!(store.counters.contains_key("registration"));
        assert!(!store.counters.contains_key("checkin"));
    }

    #[tokio::test]
    async fn test_limiter_allows_until_quota_exhausted() {
        let limiter = RateLimiter::in_memory();
        let limit = RateLimit {
            max_requests: 3,
            window_secs: 60,
        };

        for expected_remaining in [2, 1, 0] {
            let decision = limiter.check("10.0.0.1", limit).await.unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let decision = limiter.check("10.0.0.1", limit).await.unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }
}

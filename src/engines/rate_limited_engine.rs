// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// 限速抓取引擎
///
/// 包装任意抓取引擎，所有调用方共享同一个令牌桶，
/// 用于限制并发发现任务对同一来源的总请求速率。突发容量为1，请求被均匀摊开
pub struct RateLimitedEngine {
    inner: Arc<dyn ScraperEngine>,
    limiter: DefaultDirectRateLimiter,
}

impl RateLimitedEngine {
    /// 创建限速引擎
    ///
    /// # 参数
    ///
    /// * `inner` - 被包装的引擎
    /// * `requests_per_second` - 每秒最大请求数
    pub fn new(inner: Arc<dyn ScraperEngine>, requests_per_second: NonZeroU32) -> Self {
        Self {
            inner,
            limiter: RateLimiter::direct(
                Quota::per_second(requests_per_second).allow_burst(NonZeroU32::MIN),
            ),
        }
    }

    /// 按配置包装引擎，速率为0时不限速
    pub fn wrap(inner: Arc<dyn ScraperEngine>, requests_per_second: u32) -> Arc<dyn ScraperEngine> {
        match NonZeroU32::new(requests_per_second) {
            Some(rps) => Arc::new(Self::new(inner, rps)),
            None => inner,
        }
    }
}

#[async_trait]
impl ScraperEngine for RateLimitedEngine {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        self.limiter.until_ready().await;
        self.inner.scrape(request).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

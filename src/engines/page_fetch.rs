// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};
use crate::utils::retry_policy::RetryPolicy;
use thiserror::Error;

/// 页面抓取错误
///
/// 网络层错误：超时、非成功状态码、连接失败或空响应体。
/// 只影响单个页面或单个链接，不会向上扩散。
#[derive(Error, Debug)]
pub enum FetchError {
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 响应体为空
    #[error("Empty response body")]
    EmptyBody,
    /// 引擎错误（超时、连接失败等）
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl FetchError {
    pub fn is_empty_body(&self) -> bool {
        matches!(self, FetchError::EmptyBody)
    }

    /// 是否属于瞬时故障
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status(_) | FetchError::EmptyBody => true,
            FetchError::Engine(e) => e.is_retryable(),
        }
    }
}

/// 抓取单个页面并返回正文
///
/// 在引擎调用外层强制执行请求超时，使超时只影响本次请求，与引擎实现无关
pub async fn fetch_page(
    engine: &dyn ScraperEngine,
    request: &ScrapeRequest,
) -> Result<String, FetchError> {
    let response = tokio::time::timeout(request.timeout, engine.scrape(request))
        .await
        .map_err(|_| EngineError::Timeout)??;

    if !response.is_success() {
        return Err(FetchError::Status(response.status_code));
    }
    if response.is_empty_body() {
        return Err(FetchError::EmptyBody);
    }
    Ok(response.content)
}

/// 按重试策略抓取页面
///
/// `is_retryable` 决定哪些错误会触发重试
pub async fn fetch_page_with_retry<P>(
    engine: &dyn ScraperEngine,
    request: &ScrapeRequest,
    policy: &RetryPolicy,
    is_retryable: P,
) -> Result<String, FetchError>
where
    P: Fn(&FetchError) -> bool,
{
    policy
        .run(|_| fetch_page(engine, request), is_retryable)
        .await
}

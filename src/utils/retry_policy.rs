// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 重试策略配置
///
/// 固定间隔：每次重试前等待相同的时间
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（不含首次尝试）
    pub max_retries: u32,
    /// 重试间隔
    pub delay: Duration,
}

impl RetryPolicy {
    /// 创建固定间隔重试策略
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// 是否应该重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// 按策略执行异步操作
    ///
    /// 操作失败且 `is_retryable` 判定可重试时，等待重试间隔后再次执行，
    /// 直到成功或重试次数用完。闭包参数为当前尝试序号（从0开始）。
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(attempt) && is_retryable(&e) => {
                    attempt += 1;
                    debug!(
                        "Attempt {} failed ({}), retrying in {:?}",
                        attempt, e, self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            EngineError::Timeout => true,
            EngineError::Browser(_) => true,
            EngineError::Other(_) => false,
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// 目标URL
    pub url: String,
    /// 超时时间
    pub timeout: Duration,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct ScrapeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
}

impl ScrapeResponse {
    /// 状态码是否为2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// 响应体是否为空（仅包含空白字符也视为空）
    pub fn is_empty_body(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// 抓取引擎特质
///
/// 页面抓取能力的抽象，发现和分类逻辑不关心具体是HTTP客户端还是浏览器会话
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// 执行抓取
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

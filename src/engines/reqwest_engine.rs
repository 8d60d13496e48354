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

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use tracing::debug;

/// 默认User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎。
/// 所有请求共享同一个客户端（连接池与Cookie）。
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建HTTP抓取引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(user_agent: &str) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// 非2xx状态码不视为错误，由调用方根据状态码决定如何处理
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else {
                    EngineError::RequestFailed(e)
                }
            })?;

        let status_code = response.status().as_u16();
        let content = response.text().await?;
        debug!("GET {} -> {} ({} bytes)", request.url, status_code, content.len());

        Ok(ScrapeResponse {
            status_code,
            content,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::OnceCell;

// Global browser instance, launched once and shared by every page fetch.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

/// 获取或初始化共享浏览器实例
///
/// 设置了 `CHROMIUM_REMOTE_DEBUGGING_URL` 时连接远程Chrome，否则本地启动
pub async fn get_browser() -> Result<&'static Browser, EngineError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

            let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    EngineError::Browser(format!("Failed to connect to remote Chrome: {}", e))
                })?
            } else {
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30))
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(EngineError::Browser)?;

                Browser::launch(config)
                    .await
                    .map_err(|e| EngineError::Browser(e.to_string()))?
            };

            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// 可关闭的浏览器标签页
#[async_trait]
trait Tab: Send + 'static {
    async fn close_tab(self) -> Result<(), EngineError>;
}

#[async_trait]
impl Tab for Page {
    async fn close_tab(self) -> Result<(), EngineError> {
        self.close()
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))
    }
}

/// 标签页守卫
///
/// 析构时在后台关闭标签页，出错、超时或调用方丢弃future时都不会在共享浏览器中残留
struct TabGuard<T: Tab>(Option<T>);

impl<T: Tab> TabGuard<T> {
    fn new(tab: T) -> Self {
        Self(Some(tab))
    }

    fn tab(&self) -> Result<&T, EngineError> {
        self.0
            .as_ref()
            .ok_or_else(|| EngineError::Browser("Tab already closed".to_string()))
    }
}

impl<T: Tab> Drop for TabGuard<T> {
    fn drop(&mut self) {
        if let Some(tab) = self.0.take() {
            tokio::spawn(async move {
                if let Err(e) = tab.close_tab().await {
                    tracing::debug!("Failed to close tab: {}", e);
                }
            });
        }
    }
}

/// 浏览器抓取引擎
///
/// 基于chromiumoxide的有状态浏览器会话，适用于需要执行脚本才能渲染的列表和详情页
pub struct BrowserEngine {
    /// 页面加载后额外等待的时间
    settle: Duration,
}

impl BrowserEngine {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    async fn render(&self, url: &str) -> Result<String, EngineError> {
        let browser = get_browser().await?;

        let guard = TabGuard::new(
            browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Browser(e.to_string()))?,
        );
        let page = guard.tab()?;

        page.goto(url)
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;

        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }

        let content = page
            .content()
            .await
            .map_err(|e| EngineError::Browser(e.to_string()))?;
        Ok(content)
    }
}

impl Default for BrowserEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl ScraperEngine for BrowserEngine {
    /// 执行浏览器抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 抓取响应，状态码固定为200
    /// * `Err(EngineError)` - 浏览器错误或超时
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let content = tokio::time::timeout(request.timeout, self.render(&request.url))
            .await
            .map_err(|_| EngineError::Timeout)??;

        Ok(ScrapeResponse {
            status_code: 200,
            content,
        })
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

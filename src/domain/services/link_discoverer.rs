// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::link::CandidateLink;
use crate::domain::models::query::Query;
use crate::domain::services::extraction::ListingParser;
use crate::engines::page_fetch::{fetch_page_with_retry, FetchError};
use crate::engines::traits::{ScrapeRequest, ScraperEngine};
use crate::utils::retry_policy::RetryPolicy;
use futures::future::join_all;
use metrics::counter;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// 列表接口的查询参数名
#[derive(Debug, Clone)]
pub struct ListingParams {
    /// 关键词参数
    pub keyword: String,
    /// 地区参数
    pub region: String,
    /// 时间窗口参数
    pub time_window: String,
    /// 偏移量参数
    pub offset: String,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            keyword: "keywords".to_string(),
            region: "location".to_string(),
            time_window: "f_TPR".to_string(),
            offset: "start".to_string(),
        }
    }
}

/// 列表接口地址
///
/// 多数站点所有地区共用一个地址；部分站点按地区使用不同域名
#[derive(Debug, Clone)]
pub enum ListingEndpoint {
    /// 所有地区共用
    Fixed(Url),
    /// 地区名 → 该地区的列表地址
    PerRegion(HashMap<String, Url>),
}

impl ListingEndpoint {
    /// 某个地区的列表地址，未配置该地区时返回 `None`
    pub fn for_region(&self, region: &str) -> Option<&Url> {
        match self {
            ListingEndpoint::Fixed(url) => Some(url),
            ListingEndpoint::PerRegion(urls) => urls.get(region),
        }
    }
}

/// 链接发现配置
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// 列表接口地址
    pub endpoint: ListingEndpoint,
    /// 查询参数名
    pub params: ListingParams,
    /// 时间窗口过滤值，为空时不发送该参数
    pub time_window: String,
    /// 每页条数，偏移量 = 页码 × 每页条数
    pub page_size: u32,
    /// 页码上限，页码达到该值即停止
    pub page_ceiling: u32,
    /// 每次请求列表页前的等待时间
    pub page_delay: Duration,
    /// 单次请求超时
    pub request_timeout: Duration,
    /// 瞬时故障的重试策略
    pub retry: RetryPolicy,
}

/// 单页抓取结果
#[derive(Debug)]
enum PageOutcome {
    /// 解析到链接，继续下一页
    Links(Vec<String>),
    /// 页面解析成功但没有链接，列表已到底
    Exhausted,
    /// 重试后仍然失败
    Failed(FetchError),
}

/// 链接发现器
///
/// 对单个查询逐页请求列表接口，直到满足终止条件：
/// - 页码达到上限；
/// - 某页解析成功但没有任何链接；
/// - 某页在重试后仍然失败（非成功状态码、超时或空响应体）。
///
/// 失败只终止当前查询的分页，不影响其他查询。
pub struct LinkDiscoverer {
    engine: Arc<dyn ScraperEngine>,
    parser: Arc<dyn ListingParser>,
    config: DiscoveryConfig,
}

impl LinkDiscoverer {
    /// 创建链接发现器
    ///
    /// # 参数
    ///
    /// * `engine` - 页面抓取引擎
    /// * `parser` - 列表页解析器
    /// * `config` - 发现配置
    pub fn new(
        engine: Arc<dyn ScraperEngine>,
        parser: Arc<dyn ListingParser>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            engine,
            parser,
            config,
        }
    }

    /// 构造某个查询第 `page` 页的列表URL
    ///
    /// 查询的地区没有对应的列表地址时返回 `None`
    pub fn listing_url(&self, query: &Query, page: u32) -> Option<Url> {
        let mut url = self.config.endpoint.for_region(&query.region)?.clone();
        let offset = u64::from(page) * u64::from(self.config.page_size);
        {
            let params = &self.config.params;
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(&params.keyword, &query.keyword);
            pairs.append_pair(&params.region, &query.region);
            if !self.config.time_window.is_empty() {
                pairs.append_pair(&params.time_window, &self.config.time_window);
            }
            pairs.append_pair(&params.offset, &offset.to_string());
        }
        Some(url)
    }

    async fn fetch_listing_page(&self, url: Url) -> PageOutcome {
        let request = ScrapeRequest::new(url.as_str(), self.config.request_timeout);

        match fetch_page_with_retry(
            self.engine.as_ref(),
            &request,
            &self.config.retry,
            FetchError::is_transient,
        )
        .await
        {
            Ok(body) => {
                let links = self.parser.parse_links(&body, &url);
                if links.is_empty() {
                    PageOutcome::Exhausted
                } else {
                    PageOutcome::Links(links)
                }
            }
            Err(e) => PageOutcome::Failed(e),
        }
    }

    /// 发现单个查询的全部候选链接
    ///
    /// 页码严格递增；返回的链接按页码顺序排列。该方法不会失败。
    pub async fn discover(&self, query: &Query) -> Vec<CandidateLink> {
        let mut links = Vec::new();
        let mut pages_fetched = 0;

        for page in 0..self.config.page_ceiling {
            let Some(url) = self.listing_url(query, page) else {
                warn!("No listing endpoint for region of '{}', skipping", query);
                break;
            };
            if !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }

            counter!("discovery_pages_total").increment(1);
            match self.fetch_listing_page(url).await {
                PageOutcome::Links(urls) => {
                    pages_fetched += 1;
                    debug!("Page {} for '{}': {} links", page, query, urls.len());
                    links.extend(
                        urls.into_iter()
                            .map(|url| CandidateLink::new(url, query.clone(), page)),
                    );
                }
                PageOutcome::Exhausted => {
                    debug!("Page {} empty for '{}', stopping", page, query);
                    break;
                }
                PageOutcome::Failed(e) => {
                    counter!("discovery_page_failures_total").increment(1);
                    warn!("Page {} failed for '{}': {}, stopping", page, query, e);
                    break;
                }
            }
        }

        info!(
            "Discovered {} links for '{}' across {} pages",
            links.len(),
            query,
            pages_fetched
        );
        links
    }

    /// 并发发现所有查询的候选链接
    ///
    /// 每个查询独立分页，互不阻塞；所有查询都停止后才返回。
    /// 返回值与输入查询一一对应且顺序相同。
    pub async fn discover_all(&self, queries: &[Query]) -> Vec<Vec<CandidateLink>> {
        join_all(queries.iter().map(|query| self.discover(query))).await
    }
}

#[cfg(test)]
#[path = "link_discoverer_test.rs"]
mod tests;

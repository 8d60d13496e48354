// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::JobDetail;
use crate::domain::models::link::{CanonicalLink, CanonicalLinkSet};
use crate::domain::models::query::Query;
use crate::domain::services::extraction::FieldExtractor;
use crate::engines::page_fetch::{fetch_page_with_retry, FetchError};
use crate::engines::traits::{ScrapeRequest, ScraperEngine};
use crate::utils::retry_policy::RetryPolicy;
use futures::stream::{self, StreamExt};
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 详情抓取配置
#[derive(Debug, Clone)]
pub struct DetailFetchConfig {
    /// 每批链接数
    pub batch_size: usize,
    /// 批内最大并发数
    pub concurrency: usize,
    /// 批次之间的停顿
    pub batch_pause: Duration,
    /// 单次请求超时
    pub request_timeout: Duration,
    /// 空响应体的重试策略
    pub retry: RetryPolicy,
}

/// 抓取并解析成功的职位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedJob {
    /// 规范URL
    pub url: String,
    /// 首次发现该URL的查询
    pub origin_query: Query,
    pub detail: JobDetail,
}

/// 职位累加器
///
/// 只在整批完成后合并，合并后按规范链接集合的顺序重新排序，
/// 因此结果顺序与完成顺序无关。
#[derive(Debug, Default)]
pub struct JobAccumulator {
    entries: Vec<FetchedJob>,
}

impl JobAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一批结果
    pub fn merge(&mut self, batch: Vec<FetchedJob>, order: &CanonicalLinkSet) {
        self.entries.extend(batch);
        self.entries
            .sort_by_key(|e| order.position(&e.url).unwrap_or(usize::MAX));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FetchedJob] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<FetchedJob> {
        self.entries
    }
}

/// 详情抓取结果
#[derive(Debug, Default)]
pub struct DetailFetchOutcome {
    /// 按规范顺序排列的职位
    pub jobs: Vec<FetchedJob>,
    /// 被丢弃的链接数
    pub failures: usize,
}

/// 详情抓取器
///
/// 按批处理规范链接：批内并发受 `concurrency` 限制，批与批之间停顿 `batch_pause`。
/// 只有空响应体会重试；其他网络错误或非成功状态码直接丢弃该链接，不影响其他链接。
pub struct DetailFetcher {
    engine: Arc<dyn ScraperEngine>,
    extractor: Arc<dyn FieldExtractor>,
    config: DetailFetchConfig,
}

impl DetailFetcher {
    pub fn new(
        engine: Arc<dyn ScraperEngine>,
        extractor: Arc<dyn FieldExtractor>,
        config: DetailFetchConfig,
    ) -> Self {
        Self {
            engine,
            extractor,
            config,
        }
    }

    async fn fetch_one(&self, link: &CanonicalLink) -> Result<FetchedJob, FetchError> {
        counter!("detail_fetch_total").increment(1);
        let request = ScrapeRequest::new(&link.url, self.config.request_timeout);

        let body = fetch_page_with_retry(
            self.engine.as_ref(),
            &request,
            &self.config.retry,
            FetchError::is_empty_body,
        )
        .await?;

        Ok(FetchedJob {
            url: link.url.clone(),
            origin_query: link.origin_query.clone(),
            detail: self.extractor.extract(&body),
        })
    }

    async fn fetch_batch(&self, batch: &[&CanonicalLink]) -> (Vec<FetchedJob>, usize) {
        let results: Vec<_> = stream::iter(batch.iter().copied())
            .map(|link| async move { (link, self.fetch_one(link).await) })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut jobs = Vec::with_capacity(results.len());
        let mut failures = 0;
        for (link, result) in results {
            match result {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    failures += 1;
                    counter!("detail_fetch_failures_total").increment(1);
                    warn!("Dropping {}: {}", link.url, e);
                }
            }
        }
        (jobs, failures)
    }

    /// 抓取所有规范链接的详情
    pub async fn fetch_all(&self, links: &CanonicalLinkSet) -> DetailFetchOutcome {
        let all: Vec<&CanonicalLink> = links.iter().collect();
        let batches: Vec<&[&CanonicalLink]> = all.chunks(self.config.batch_size.max(1)).collect();
        let batch_count = batches.len();

        let mut accumulator = JobAccumulator::new();
        let mut failures = 0;

        for (i, batch) in batches.into_iter().enumerate() {
            debug!("Fetching batch {}/{} ({} links)", i + 1, batch_count, batch.len());
            let (jobs, failed) = self.fetch_batch(batch).await;
            failures += failed;
            accumulator.merge(jobs, links);

            if i + 1 < batch_count && !self.config.batch_pause.is_zero() {
                tokio::time::sleep(self.config.batch_pause).await;
            }
        }

        info!(
            "Fetched {} job details, {} failed",
            accumulator.len(),
            failures
        );
        DetailFetchOutcome {
            jobs: accumulator.into_entries(),
            failures,
        }
    }
}

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

use crate::{
    config::settings::Settings,
    domain::{
        models::{job::JobRecord, taxonomy::KeywordTaxonomy},
        repositories::sink_repository::{SinkError, SinkRepository},
        services::{
            classifier::{Classifier, TaxonomyError},
            deduplicator::Deduplicator,
            detail_fetcher::{DetailFetchConfig, DetailFetcher},
            extraction::{FieldExtractor, ListingParser},
            link_discoverer::{DiscoveryConfig, LinkDiscoverer},
            location_filter::LocationFilter,
            query_enumerator::QueryEnumerator,
            result_aggregator::{ResultAggregator, TableNames},
        },
    },
    engines::traits::ScraperEngine,
    utils::url_utils::UrlCanonicalizer,
};
use chrono::NaiveDate;
use config::ConfigError;
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// 一次扫描的完整配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub keywords: Vec<String>,
    pub regions: Vec<String>,
    pub discovery: DiscoveryConfig,
    pub detail: DetailFetchConfig,
    pub tracking_params: Vec<String>,
    pub excluded_locations: Vec<String>,
    pub filter_keywords: Vec<String>,
    pub taxonomy: KeywordTaxonomy,
    pub tables: TableNames,
    pub include_zero_counts: bool,
    /// 写入记录的日期
    pub run_date: NaiveDate,
}

impl ScanConfig {
    pub fn from_settings(settings: &Settings, run_date: NaiveDate) -> Result<Self, ConfigError> {
        Ok(Self {
            keywords: settings.search.keywords.clone(),
            regions: settings.search.regions.clone(),
            discovery: settings.discovery_config()?,
            detail: settings.detail_fetch_config(),
            tracking_params: settings.listing.tracking_params.clone(),
            excluded_locations: settings.filter.excluded_locations.clone(),
            filter_keywords: settings.filter.filter_keywords.clone(),
            taxonomy: settings.keyword_taxonomy(),
            tables: settings.table_names(),
            include_zero_counts: settings.sink.include_zero_counts,
            run_date,
        })
    }
}

/// 扫描报告：各阶段计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub queries: usize,
    pub candidate_links: usize,
    pub unique_links: usize,
    pub fetched: usize,
    pub fetch_failures: usize,
    pub excluded: usize,
    pub kept: usize,
    pub matched: usize,
    pub skill_rows: usize,
}

/// 扫描用例
///
/// 查询枚举 → 链接发现 → 去重 → 详情抓取 → 地区过滤 → 分类 → 汇总写入。
/// 网络错误只影响单个页面或链接；唯一会导致运行失败的是结果写入失败，
/// 且只会发生在所有结果都已在内存中生成之后。
pub struct ScanUseCase<S> {
    discoverer: LinkDiscoverer,
    deduplicator: Deduplicator,
    fetcher: DetailFetcher,
    filter: LocationFilter,
    classifier: Classifier,
    aggregator: ResultAggregator,
    sink: Arc<S>,
    keywords: Vec<String>,
    regions: Vec<String>,
    run_date: NaiveDate,
}

impl<S> ScanUseCase<S>
where
    S: SinkRepository + 'static,
{
    /// 创建扫描用例
    ///
    /// 关键词无法编译为匹配模式时返回 [`ScanError::Taxonomy`]
    pub fn new(
        engine: Arc<dyn ScraperEngine>,
        parser: Arc<dyn ListingParser>,
        extractor: Arc<dyn FieldExtractor>,
        sink: Arc<S>,
        config: ScanConfig,
    ) -> Result<Self, ScanError> {
        let classifier = Classifier::new(&config.filter_keywords, &config.taxonomy)?;

        Ok(Self {
            discoverer: LinkDiscoverer::new(engine.clone(), parser, config.discovery),
            deduplicator: Deduplicator::new(UrlCanonicalizer::new(config.tracking_params)),
            fetcher: DetailFetcher::new(engine, extractor, config.detail),
            filter: LocationFilter::new(&config.excluded_locations),
            classifier,
            aggregator: ResultAggregator::new(
                config.taxonomy,
                config.tables,
                config.include_zero_counts,
            ),
            sink,
            keywords: config.keywords,
            regions: config.regions,
            run_date: config.run_date,
        })
    }

    /// 执行一次完整扫描
    pub async fn run(&self) -> Result<ScanReport, ScanError> {
        let mut report = ScanReport::default();

        // 1. Enumerate queries
        let queries = QueryEnumerator::enumerate(&self.keywords, &self.regions);
        report.queries = queries.len();
        info!("Scanning {} queries", queries.len());

        // 2. Discover links
        let discovered = self.discoverer.discover_all(&queries).await;
        report.candidate_links = discovered.iter().map(Vec::len).sum();

        // 3. Deduplicate
        let links = self.deduplicator.merge(discovered);
        report.unique_links = links.len();
        info!(
            "Discovered {} candidate links, {} unique",
            report.candidate_links, report.unique_links
        );

        // 4. Fetch details
        let outcome = self.fetcher.fetch_all(&links).await;
        report.fetched = outcome.jobs.len();
        report.fetch_failures = outcome.failures;

        // 5. Filter and classify
        let mut records = Vec::with_capacity(outcome.jobs.len());
        for job in outcome.jobs {
            if !self.filter.keep(&job.detail) {
                report.excluded += 1;
                debug!("Excluded {} ({})", job.url, job.detail.location);
                continue;
            }
            let record =
                JobRecord::from_detail(job.url, job.origin_query, job.detail, self.run_date);
            records.push(self.classifier.apply(record));
        }
        report.kept = records.len();
        report.matched = records.iter().filter(|r| r.has_filter_match()).count();
        counter!("jobs_excluded_total").increment(report.excluded as u64);
        counter!("jobs_kept_total").increment(report.kept as u64);
        info!(
            "Kept {} jobs ({} excluded), {} matched filter keywords",
            report.kept, report.excluded, report.matched
        );

        // 6. Aggregate and write
        let results = self.aggregator.aggregate(&records, self.run_date);
        report.skill_rows = results.skill_rows.len();
        self.aggregator.deliver(&results, self.sink.as_ref()).await?;

        Ok(report)
    }
}

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

use crate::domain::models::taxonomy::KeywordTaxonomy;
use crate::domain::services::detail_fetcher::DetailFetchConfig;
use crate::domain::services::link_discoverer::{DiscoveryConfig, ListingEndpoint, ListingParams};
use crate::domain::services::result_aggregator::TableNames;
use crate::infrastructure::extractors::linkedin::DetailSelectors;
use crate::utils::retry_policy::RetryPolicy;
use chrono::{Days, NaiveDate};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// 应用程序配置设置
///
/// 包含查询、列表接口、抓取、过滤、分类体系、输出和运行日期等所有配置项
#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    /// 查询配置
    #[serde(default)]
    #[validate(nested)]
    pub search: SearchSettings,
    /// 列表接口配置
    #[validate(nested)]
    pub listing: ListingSettings,
    /// 抓取配置
    #[validate(nested)]
    pub fetch: FetchSettings,
    /// 详情页字段选择器
    #[serde(default)]
    pub detail: DetailSelectors,
    /// 过滤配置
    #[serde(default)]
    pub filter: FilterSettings,
    /// 技能分类体系，按声明顺序
    #[serde(default)]
    pub taxonomy: Vec<TaxonomyEntry>,
    /// 输出配置
    pub sink: SinkSettings,
    /// 运行配置
    pub run: RunSettings,
}

/// 查询配置设置
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchSettings {
    /// 搜索关键词
    #[serde(default)]
    pub keywords: Vec<String>,
    /// 搜索地区
    #[serde(default)]
    pub regions: Vec<String>,
}

/// 列表地址中按地区替换的主机占位符
pub const HOST_PLACEHOLDER: &str = "{host}";

/// 列表接口配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct ListingSettings {
    /// 列表接口地址，可包含 `{host}` 占位符
    pub endpoint: String,
    /// 地区 → 替换 `{host}` 的值（不区分大小写）
    #[serde(default)]
    pub region_hosts: HashMap<String, String>,
    /// 关键词参数名
    pub keyword_param: String,
    /// 地区参数名
    pub region_param: String,
    /// 时间窗口参数名
    pub time_window_param: String,
    /// 偏移量参数名
    pub offset_param: String,
    /// 时间窗口值，为空时不发送
    pub time_window: String,
    /// 每页条数
    #[validate(range(min = 1))]
    pub page_size: u32,
    /// 每个查询的页码上限
    #[validate(range(min = 1))]
    pub page_ceiling: u32,
    /// 每次请求列表页前的等待时间（毫秒）
    pub page_delay_ms: u64,
    /// 列表页职位链接选择器
    pub link_selector: String,
    /// 规范化时去掉的跟踪参数
    pub tracking_params: Vec<String>,
}

/// 抓取引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// HTTP客户端
    Reqwest,
    /// 无头浏览器
    Browser,
}

/// 抓取配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct FetchSettings {
    /// 抓取引擎
    pub engine: EngineKind,
    /// 请求使用的User-Agent
    pub user_agent: String,
    /// 单次请求超时（秒）
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    /// 瞬时故障的重试次数
    pub retry_count: u32,
    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,
    /// 详情抓取每批链接数
    #[validate(range(min = 1))]
    pub batch_size: usize,
    /// 批内最大并发数
    #[validate(range(min = 1))]
    pub concurrency: usize,
    /// 批次之间的停顿（毫秒）
    pub batch_pause_ms: u64,
    /// 全局每秒请求数上限，0 表示不限制
    pub requests_per_second: u32,
    /// 浏览器引擎页面加载后的等待时间（毫秒）
    pub browser_settle_ms: u64,
}

/// 过滤配置设置
#[derive(Debug, Default, Deserialize)]
pub struct FilterSettings {
    /// 排除的地区（不区分大小写的子串）
    #[serde(default)]
    pub excluded_locations: Vec<String>,
    /// 过滤关键词
    #[serde(default)]
    pub filter_keywords: Vec<String>,
}

/// 分类体系条目
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyEntry {
    /// 分类名
    pub tag: String,
    /// 该分类下的技能词
    pub skills: Vec<String>,
}

/// 输出配置设置
#[derive(Debug, Deserialize)]
pub struct SinkSettings {
    /// 输出目录
    pub output_dir: String,
    /// 职位表名
    pub jobs_table: String,
    /// 命中职位表名
    pub matched_jobs_table: String,
    /// 技能计数表名
    pub skill_counts_table: String,
    /// 是否输出计数为零的技能
    pub include_zero_counts: bool,
}

/// 运行配置设置
#[derive(Debug, Deserialize)]
pub struct RunSettings {
    /// 运行日期相对今天向前偏移的天数
    pub date_offset_days: u64,
}

impl Settings {
    /// 带默认值的配置构建器
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Config::builder()
            // Listing endpoint
            .set_default(
                "listing.endpoint",
                "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search",
            )?
            .set_default("listing.keyword_param", "keywords")?
            .set_default("listing.region_param", "location")?
            .set_default("listing.time_window_param", "f_TPR")?
            .set_default("listing.offset_param", "start")?
            .set_default("listing.time_window", "r86400")?
            .set_default("listing.page_size", 25)?
            .set_default("listing.page_ceiling", 100)?
            .set_default("listing.page_delay_ms", 1500)?
            .set_default(
                "listing.link_selector",
                crate::infrastructure::extractors::linkedin::DEFAULT_LINK_SELECTOR,
            )?
            .set_default(
                "listing.tracking_params",
                crate::utils::url_utils::DEFAULT_TRACKING_PARAMS.to_vec(),
            )?
            // Fetch settings
            .set_default("fetch.engine", "reqwest")?
            .set_default("fetch.user_agent", crate::engines::reqwest_engine::DEFAULT_USER_AGENT)?
            .set_default("fetch.request_timeout_secs", 30)?
            .set_default("fetch.retry_count", 1)?
            .set_default("fetch.retry_delay_ms", 2000)?
            .set_default("fetch.batch_size", 50)?
            .set_default("fetch.concurrency", 10)?
            .set_default("fetch.batch_pause_ms", 5000)?
            .set_default("fetch.requests_per_second", 0)?
            .set_default("fetch.browser_settle_ms", 2000)?
            // Sink settings
            .set_default("sink.output_dir", "./output")?
            .set_default("sink.jobs_table", "jobs")?
            .set_default("sink.matched_jobs_table", "matched_jobs")?
            .set_default("sink.skill_counts_table", "skill_counts")?
            .set_default("sink.include_zero_counts", true)?
            // Run settings
            .set_default("run.date_offset_days", 1)?;

        Ok(builder)
    }

    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `JOBSIFT__` 前缀的环境变量，后加载的覆盖先加载的
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并校验的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("JOBSIFT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search.keywords")
                    .with_list_parse_key("search.regions")
                    .with_list_parse_key("filter.excluded_locations")
                    .with_list_parse_key("filter.filter_keywords")
                    .with_list_parse_key("listing.tracking_params"),
            );

        Self::load(builder)
    }

    /// 从TOML文本加载配置（叠加在默认值之上）
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::load(Self::builder()?.add_source(File::from_str(content, FileFormat::Toml)))
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("Validation error: {}", e)))?;
        Ok(settings)
    }

    /// 重试策略：固定间隔
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.fetch.retry_count,
            Duration::from_millis(self.fetch.retry_delay_ms),
        )
    }

    /// 列表接口地址
    ///
    /// 地址包含 `{host}` 时，每个查询地区都必须在 `listing.region_hosts` 中有对应值
    pub fn listing_endpoint(&self) -> Result<ListingEndpoint, ConfigError> {
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|e| {
                ConfigError::Message(format!("Invalid listing endpoint '{}': {}", raw, e))
            })
        };

        if !self.listing.endpoint.contains(HOST_PLACEHOLDER) {
            return Ok(ListingEndpoint::Fixed(parse(&self.listing.endpoint)?));
        }

        let hosts: HashMap<String, &str> = self
            .listing
            .region_hosts
            .iter()
            .map(|(region, host)| (region.to_lowercase(), host.as_str()))
            .collect();

        let mut endpoints = HashMap::new();
        for region in &self.search.regions {
            let host = hosts.get(&region.to_lowercase()).ok_or_else(|| {
                ConfigError::Message(format!("No listing host configured for region '{}'", region))
            })?;
            let url = parse(&self.listing.endpoint.replace(HOST_PLACEHOLDER, host))?;
            endpoints.insert(region.clone(), url);
        }
        Ok(ListingEndpoint::PerRegion(endpoints))
    }

    /// 链接发现配置
    pub fn discovery_config(&self) -> Result<DiscoveryConfig, ConfigError> {
        let endpoint = self.listing_endpoint()?;

        Ok(DiscoveryConfig {
            endpoint,
            params: ListingParams {
                keyword: self.listing.keyword_param.clone(),
                region: self.listing.region_param.clone(),
                time_window: self.listing.time_window_param.clone(),
                offset: self.listing.offset_param.clone(),
            },
            time_window: self.listing.time_window.clone(),
            page_size: self.listing.page_size,
            page_ceiling: self.listing.page_ceiling,
            page_delay: Duration::from_millis(self.listing.page_delay_ms),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            retry: self.retry_policy(),
        })
    }

    /// 详情抓取配置
    pub fn detail_fetch_config(&self) -> DetailFetchConfig {
        DetailFetchConfig {
            batch_size: self.fetch.batch_size,
            concurrency: self.fetch.concurrency,
            batch_pause: Duration::from_millis(self.fetch.batch_pause_ms),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            retry: self.retry_policy(),
        }
    }

    /// 技能分类体系
    pub fn keyword_taxonomy(&self) -> KeywordTaxonomy {
        KeywordTaxonomy::from_entries(
            self.taxonomy
                .iter()
                .map(|entry| (entry.tag.clone(), entry.skills.clone())),
        )
    }

    /// 输出表名
    pub fn table_names(&self) -> TableNames {
        TableNames {
            jobs: self.sink.jobs_table.clone(),
            matched_jobs: self.sink.matched_jobs_table.clone(),
            skill_counts: self.sink.skill_counts_table.clone(),
        }
    }

    /// 运行日期：`today` 向前偏移 `run.date_offset_days` 天
    pub fn run_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.run.date_offset_days))
            .unwrap_or(today)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

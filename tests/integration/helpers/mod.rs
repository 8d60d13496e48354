// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use jobsift::application::use_cases::scan_use_case::{ScanConfig, ScanUseCase};
use jobsift::config::settings::Settings;
use jobsift::domain::repositories::sink_repository::SinkRepository;
use jobsift::engines::reqwest_engine::ReqwestEngine;
use jobsift::infrastructure::extractors::linkedin::{LinkedInFieldExtractor, LinkedInListingParser};
use chrono::NaiveDate;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// 列表页HTML，每个URL对应一张职位卡片
pub fn listing_html(urls: &[String]) -> String {
    let cards: String = urls
        .iter()
        .map(|url| {
            format!(
                r#"<li><div class="base-card"><a class="base-card__full-link" href="{}"><span class="sr-only">Job</span></a></div></li>"#,
                url
            )
        })
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", cards)
}

/// 详情页HTML
pub fn detail_html(title: &str, company: &str, location: &str, description: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="top-card-layout__title">{}</h1>
            <a class="topcard__org-name-link" href="/company">{}</a>
            <span class="topcard__flavor--bullet">{}</span>
            <div class="description__text--rich"><p>{}</p></div>
        </body></html>"#,
        title, company, location, description
    )
}

/// 挂载某个查询第 `page` 页的列表响应
pub async fn mount_listing(server: &MockServer, keyword: &str, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("keywords", keyword))
        .and(query_param("f_TPR", "r86400"))
        .and(query_param("start", (page * 25).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// 挂载兜底的空列表页，必须在所有具体列表响应之后挂载
pub async fn mount_empty_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[])))
        .mount(server)
        .await;
}

pub fn settings(server: &MockServer) -> Settings {
    let toml = format!(
        r#"
[search]
keywords = ["AI", "HR"]
regions = ["Worldwide"]

[listing]
endpoint = "{}{}"
page_ceiling = 5
page_delay_ms = 0

[fetch]
request_timeout_secs = 5
retry_delay_ms = 10
batch_size = 2
concurrency = 2
batch_pause_ms = 10

[filter]
excluded_locations = ["Canada"]
filter_keywords = ["n8n", "Zapier", "Data"]

[[taxonomy]]
tag = "Automation"
skills = ["n8n", "zapier"]

[[taxonomy]]
tag = "Data"
skills = ["data", "sql"]

[[taxonomy]]
tag = "Programming"
skills = ["python"]
"#,
        server.uri(),
        LISTING_PATH
    );
    Settings::from_toml(&toml).unwrap()
}

pub fn scan_use_case<S>(server: &MockServer, sink: Arc<S>) -> ScanUseCase<S>
where
    S: SinkRepository + 'static,
{
    let settings = settings(server);
    let config = ScanConfig::from_settings(&settings, run_date()).unwrap();

    ScanUseCase::new(
        Arc::new(ReqwestEngine::new(&settings.fetch.user_agent).unwrap()),
        Arc::new(LinkedInListingParser::new(&settings.listing.link_selector).unwrap()),
        Arc::new(LinkedInFieldExtractor::new(&settings.detail).unwrap()),
        sink,
        config,
    )
    .unwrap()
}

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

use anyhow::Context;
use jobsift::application::use_cases::scan_use_case::{ScanConfig, ScanUseCase};
use jobsift::config::settings::{EngineKind, Settings};
use jobsift::engines::browser_engine::BrowserEngine;
use jobsift::engines::rate_limited_engine::RateLimitedEngine;
use jobsift::engines::reqwest_engine::ReqwestEngine;
use jobsift::engines::traits::ScraperEngine;
use jobsift::infrastructure::extractors::linkedin::{LinkedInFieldExtractor, LinkedInListingParser};
use jobsift::infrastructure::metrics;
use jobsift::infrastructure::sinks::csv_sink::CsvSink;
use jobsift::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// 主函数
///
/// 应用程序入口点，负责加载配置、组装组件并执行一次扫描
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting jobsift...");
    let metrics_handle = metrics::init_metrics().context("Failed to install metrics recorder")?;

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize engine
    let engine: Arc<dyn ScraperEngine> = match settings.fetch.engine {
        EngineKind::Reqwest => Arc::new(ReqwestEngine::new(&settings.fetch.user_agent)?),
        EngineKind::Browser => Arc::new(BrowserEngine::new(Duration::from_millis(
            settings.fetch.browser_settle_ms,
        ))),
    };
    info!("Using {} engine", engine.name());
    let engine = RateLimitedEngine::wrap(engine, settings.fetch.requests_per_second);

    // 4. Initialize parsers and sink
    let parser = Arc::new(LinkedInListingParser::new(&settings.listing.link_selector)?);
    let extractor = Arc::new(LinkedInFieldExtractor::new(&settings.detail)?);
    let sink = Arc::new(CsvSink::new(&settings.sink.output_dir));

    // 5. Run scan
    let run_date = settings.run_date(chrono::Local::now().date_naive());
    let config = ScanConfig::from_settings(&settings, run_date)?;
    let use_case = ScanUseCase::new(engine, parser, extractor, sink, config)?;

    let result = use_case.run().await;
    debug!("Metrics snapshot:\n{}", metrics_handle.render());

    match result {
        Ok(report) => {
            info!(
                "Scan finished for {}: {}",
                run_date,
                serde_json::to_string(&report)?
            );
            Ok(())
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            Err(e).context("Failed to write scan results")
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// 注册扫描过程中使用的计数器说明
pub fn describe_metrics() {
    describe_counter!(
        "discovery_pages_total",
        "Total number of listing pages requested"
    );
    describe_counter!(
        "discovery_page_failures_total",
        "Total number of listing pages that failed after retry"
    );
    describe_counter!("detail_fetch_total", "Total number of detail pages requested");
    describe_counter!(
        "detail_fetch_failures_total",
        "Total number of detail pages that failed after retry"
    );
    describe_counter!(
        "jobs_excluded_total",
        "Total number of jobs dropped by location exclusion"
    );
    describe_counter!("jobs_kept_total", "Total number of jobs kept after filtering");
}

/// 初始化指标系统
///
/// 安装全局Prometheus记录器；扫描是一次性任务，不启动HTTP监听，
/// 结束时通过返回的句柄渲染指标快照
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

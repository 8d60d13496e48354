// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    detail_html, listing_html, mount_empty_listings, mount_listing, scan_use_case,
};
use async_trait::async_trait;
use jobsift::application::use_cases::scan_use_case::{ScanError, ScanReport};
use jobsift::domain::models::table::Table;
use jobsift::domain::repositories::sink_repository::{SinkError, SinkRepository};
use jobsift::infrastructure::sinks::csv_sink::CsvSink;
use jobsift::infrastructure::sinks::memory_sink::MemorySink;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 两个查询：AI 发现 {A, B, C}，HR 发现 {B, C, D, E}。
/// E 的详情页返回500，B 位于加拿大，D 第一次返回空响应体。
async fn mount_job_site(server: &MockServer) {
    let job = |slug: &str, trk: &str| format!("{}/jobs/view/{}?trk={}", server.uri(), slug, trk);

    mount_listing(
        server,
        "AI",
        0,
        listing_html(&[job("a-101", "ai"), job("b-102", "ai"), job("c-103", "ai")]),
    )
    .await;
    mount_listing(
        server,
        "HR",
        0,
        listing_html(&[
            job("b-102", "hr"),
            job("c-103", "hr"),
            job("d-104", "hr"),
            job("e-105", "hr"),
        ]),
    )
    .await;
    mount_empty_listings(server).await;

    let details = [
        (
            "a-101",
            detail_html("Automation Engineer", "Acme", "Casablanca, Morocco", "We build n8n flows in Python."),
        ),
        (
            "b-102",
            detail_html("Data Analyst", "Maple", "Toronto, Ontario, Canada", "python, n8n and data"),
        ),
        (
            "c-103",
            detail_html("Backend Developer", "Globex", "Remote", "Relational databases are great."),
        ),
    ];
    for (slug, body) in details {
        Mock::given(method("GET"))
            .and(path(format!("/jobs/view/{}", slug)))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/jobs/view/d-104"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/view/d-104"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html(
            "Ops Specialist",
            "Initech",
            "Lisbon, Portugal",
            "Zapier and SQL reporting.",
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs/view/e-105"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(server)
        .await;
}

fn column<'a>(table: &'a Table, name: &str) -> Vec<&'a str> {
    let index = table.header.iter().position(|h| h == name).unwrap();
    table.rows.iter().map(|row| row[index].as_str()).collect()
}

#[tokio::test]
async fn test_scan_end_to_end() {
    let server = MockServer::start().await;
    mount_job_site(&server).await;
    let sink = Arc::new(MemorySink::new());

    let report = scan_use_case(&server, sink.clone()).run().await.unwrap();

    assert_eq!(
        report,
        ScanReport {
            queries: 2,
            candidate_links: 7,
            unique_links: 5,
            fetched: 4,
            fetch_failures: 1,
            excluded: 1,
            kept: 3,
            matched: 2,
            skill_rows: 5,
        }
    );

    let uri = server.uri();
    let jobs = sink.table("jobs").unwrap();
    assert_eq!(
        column(&jobs, "Link"),
        vec![
            format!("{}/jobs/view/a-101", uri),
            format!("{}/jobs/view/c-103", uri),
            format!("{}/jobs/view/d-104", uri),
        ]
    );
    assert_eq!(column(&jobs, "SearchedKeyword"), vec!["AI", "AI", "HR"]);
    assert_eq!(column(&jobs, "Date"), vec!["2025-06-02"; 3]);
    assert_eq!(column(&jobs, "FoundKeywords"), vec!["n8n", "", "Zapier"]);

    let matched = sink.table("matched_jobs").unwrap();
    assert_eq!(column(&matched, "Title"), vec!["Automation Engineer", "Ops Specialist"]);

    let counts = sink.table("skill_counts").unwrap();
    let rows: Vec<(&str, &str, &str)> = counts
        .rows
        .iter()
        .map(|r| (r[1].as_str(), r[2].as_str(), r[3].as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Automation", "n8n", "1"),
            ("Automation", "zapier", "1"),
            ("Data", "data", "0"),
            ("Data", "sql", "1"),
            ("Programming", "python", "1"),
        ]
    );
}

#[tokio::test]
async fn test_scan_writes_csv_tables() {
    let server = MockServer::start().await;
    mount_job_site(&server).await;
    let dir = tempdir().unwrap();
    let sink = Arc::new(CsvSink::new(dir.path()));

    scan_use_case(&server, sink.clone()).run().await.unwrap();

    let jobs = std::fs::read_to_string(sink.table_path("jobs")).unwrap();
    let mut lines = jobs.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Title,Company,Location,Link,SearchedKeyword,FoundKeywords")
    );
    assert_eq!(lines.count(), 3);

    let counts = std::fs::read_to_string(sink.table_path("skill_counts")).unwrap();
    assert!(counts.starts_with("Date,Tag,Skill,Count\n"));
    assert!(counts.contains("2025-06-02,Automation,n8n,1\n"));
    assert_eq!(counts.lines().count(), 6);
}

#[tokio::test]
async fn test_scan_with_no_listings_writes_empty_tables() {
    let server = MockServer::start().await;
    mount_empty_listings(&server).await;
    let sink = Arc::new(MemorySink::new());

    let report = scan_use_case(&server, sink.clone()).run().await.unwrap();

    assert_eq!(report.unique_links, 0);
    assert!(sink.table("jobs").unwrap().is_empty());
    assert_eq!(sink.table("skill_counts").unwrap().len(), 5);
}

/// 覆盖写入成功、追加写入被拒绝的存储
#[derive(Default)]
struct RejectingAppendSink {
    written: Mutex<Vec<String>>,
}

#[async_trait]
impl SinkRepository for RejectingAppendSink {
    async fn overwrite(&self, table: &Table) -> Result<(), SinkError> {
        self.written.lock().unwrap().push(table.name.clone());
        Ok(())
    }

    async fn append(&self, _table: &Table) -> Result<(), SinkError> {
        Err(SinkError::Other("permission denied".to_string()))
    }
}

#[tokio::test]
async fn test_sink_failure_fails_the_run() {
    let server = MockServer::start().await;
    mount_job_site(&server).await;
    let sink = Arc::new(RejectingAppendSink::default());

    let result = scan_use_case(&server, sink.clone()).run().await;

    match result {
        Err(ScanError::Sink(SinkError::Other(message))) => {
            assert_eq!(message, "permission denied")
        }
        other => panic!("expected sink error, got {:?}", other),
    }
    assert_eq!(
        *sink.written.lock().unwrap(),
        vec!["jobs".to_string(), "matched_jobs".to_string()]
    );
}

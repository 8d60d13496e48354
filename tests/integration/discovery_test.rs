// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{listing_html, mount_empty_listings, mount_listing, settings, LISTING_PATH};
use jobsift::domain::models::query::Query;
use jobsift::domain::services::link_discoverer::LinkDiscoverer;
use jobsift::engines::rate_limited_engine::RateLimitedEngine;
use jobsift::engines::reqwest_engine::ReqwestEngine;
use jobsift::infrastructure::extractors::linkedin::LinkedInListingParser;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discoverer(server: &MockServer, requests_per_second: u32) -> LinkDiscoverer {
    let settings = settings(server);
    let engine = RateLimitedEngine::wrap(
        Arc::new(ReqwestEngine::new(&settings.fetch.user_agent).unwrap()),
        requests_per_second,
    );
    LinkDiscoverer::new(
        engine,
        Arc::new(LinkedInListingParser::with_defaults().unwrap()),
        settings.discovery_config().unwrap(),
    )
}

#[tokio::test]
async fn test_transient_status_is_retried_and_paging_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("keywords", "AI"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    let page = |n: u32| vec![format!("{}/jobs/view/job-{}", server.uri(), n)];
    mount_listing(&server, "AI", 0, listing_html(&page(1))).await;
    mount_listing(&server, "AI", 1, listing_html(&page(2))).await;
    mount_empty_listings(&server).await;

    let links = discoverer(&server, 0)
        .discover(&Query::new("AI", "Worldwide"))
        .await;

    let pages: Vec<u32> = links.iter().map(|l| l.discovered_at).collect();
    assert_eq!(pages, vec![0, 1]);
    assert!(links[1].url.ends_with("/jobs/view/job-2"));
}

#[tokio::test]
async fn test_persistent_failure_stops_only_that_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("keywords", "HR"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    mount_listing(
        &server,
        "AI",
        0,
        listing_html(&[format!("{}/jobs/view/job-1", server.uri())]),
    )
    .await;
    mount_empty_listings(&server).await;

    let results = discoverer(&server, 20)
        .discover_all(&[Query::new("HR", "Worldwide"), Query::new("AI", "Worldwide")])
        .await;

    assert!(results[0].is_empty());
    assert_eq!(results[1].len(), 1);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{parse_selector, SelectorError};
use crate::domain::models::job::{JobDetail, NOT_FOUND};
use crate::domain::services::extraction::{FieldExtractor, ListingParser};
use crate::utils::url_utils::resolve_url;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// 列表页职位卡片链接的默认选择器
pub const DEFAULT_LINK_SELECTOR: &str = "a.base-card__full-link";

/// 详情页字段选择器
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: "h1.top-card-layout__title, h2.top-card-layout__title".to_string(),
            company: "a.topcard__org-name-link".to_string(),
            location: "span.topcard__flavor--bullet".to_string(),
            description: "div.description__text--rich".to_string(),
        }
    }
}

/// 提取元素文本：去掉首尾空白，连续空白压缩为一个空格
fn element_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

/// LinkedIn 公开职位列表解析器
pub struct LinkedInListingParser {
    link_selector: Selector,
}

impl LinkedInListingParser {
    pub fn new(link_selector: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            link_selector: parse_selector(link_selector)?,
        })
    }

    pub fn with_defaults() -> Result<Self, SelectorError> {
        Self::new(DEFAULT_LINK_SELECTOR)
    }
}

impl ListingParser for LinkedInListingParser {
    fn parse_links(&self, html: &str, base_url: &Url) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.link_selector)
            .filter_map(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .filter_map(|href| match resolve_url(base_url, href) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!("Skipping unresolvable link '{}': {}", href, e);
                    None
                }
            })
            .collect()
    }
}

/// LinkedIn 公开职位详情提取器
pub struct LinkedInFieldExtractor {
    title: Selector,
    company: Selector,
    location: Selector,
    description: Selector,
}

impl LinkedInFieldExtractor {
    pub fn new(selectors: &DetailSelectors) -> Result<Self, SelectorError> {
        Ok(Self {
            title: parse_selector(&selectors.title)?,
            company: parse_selector(&selectors.company)?,
            location: parse_selector(&selectors.location)?,
            description: parse_selector(&selectors.description)?,
        })
    }

    pub fn with_defaults() -> Result<Self, SelectorError> {
        Self::new(&DetailSelectors::default())
    }
}

impl FieldExtractor for LinkedInFieldExtractor {
    fn extract(&self, html: &str) -> JobDetail {
        let document = Html::parse_document(html);
        JobDetail {
            title: element_text(&document, &self.title),
            company: element_text(&document, &self.company),
            location: element_text(&document, &self.location),
            description: element_text(&document, &self.description),
        }
    }
}

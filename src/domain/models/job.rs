// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::query::Query;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// 字段缺失时使用的占位值
pub const NOT_FOUND: &str = "Not Found";

/// 判断字段是否为占位值
pub fn is_not_found(value: &str) -> bool {
    value == NOT_FOUND
}

/// 职位详情字段
///
/// 字段提取器的输出。任意字段无法提取时取值为 [`NOT_FOUND`]，
/// 不会导致整条记录失败。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

impl JobDetail {
    /// 所有字段均为占位值的详情
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND.to_string(),
            company: NOT_FOUND.to_string(),
            location: NOT_FOUND.to_string(),
            description: NOT_FOUND.to_string(),
        }
    }
}

/// 职位记录
///
/// 每个通过抓取、解析和地区过滤的规范URL对应一条记录。
/// 分类完成后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    /// 规范化后的职位URL
    pub url: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// 首次发现该职位的查询
    pub origin_query: Query,
    /// 运行日期
    pub date: NaiveDate,
    /// 描述中出现的过滤关键词，按配置顺序排列
    pub matched_filter_keywords: Vec<String>,
    /// 描述中出现的技能词
    pub skill_hits: BTreeSet<String>,
}

impl JobRecord {
    /// 由详情创建尚未分类的记录
    pub fn from_detail(url: String, origin_query: Query, detail: JobDetail, date: NaiveDate) -> Self {
        Self {
            url,
            title: detail.title,
            company: detail.company,
            location: detail.location,
            description: detail.description,
            origin_query,
            date,
            matched_filter_keywords: Vec::new(),
            skill_hits: BTreeSet::new(),
        }
    }

    /// 是否命中任一过滤关键词
    pub fn has_filter_match(&self) -> bool {
        !self.matched_filter_keywords.is_empty()
    }
}

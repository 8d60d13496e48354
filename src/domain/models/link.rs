// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::query::Query;
use std::collections::HashMap;

/// 候选链接
///
/// 分页发现过程中得到的职位链接，带有来源查询和所在页码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// 原始职位URL
    pub url: String,
    /// 发现该链接的查询
    pub origin_query: Query,
    /// 发现该链接的页码（从0开始）
    pub discovered_at: u32,
}

impl CandidateLink {
    pub fn new(url: impl Into<String>, origin_query: Query, discovered_at: u32) -> Self {
        Self {
            url: url.into(),
            origin_query,
            discovered_at,
        }
    }
}

/// 规范链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLink {
    /// 规范化后的URL
    pub url: String,
    /// 首次发现该URL的查询
    pub origin_query: Query,
}

/// 规范链接集合
///
/// 有序且唯一：同一个规范URL只出现一次，并且只保留第一次出现时的查询。
/// 迭代顺序即插入顺序。
#[derive(Debug, Clone, Default)]
pub struct CanonicalLinkSet {
    entries: Vec<CanonicalLink>,
    index: HashMap<String, usize>,
}

impl CanonicalLinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入规范URL
    ///
    /// # 返回值
    ///
    /// 如果URL是新的则返回true；已存在时返回false，且原有查询保持不变
    pub fn insert(&mut self, url: String, origin_query: Query) -> bool {
        if self.index.contains_key(&url) {
            return false;
        }
        self.index.insert(url.clone(), self.entries.len());
        self.entries.push(CanonicalLink { url, origin_query });
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// 查找URL对应的来源查询
    pub fn query_for(&self, url: &str) -> Option<&Query> {
        self.index.get(url).map(|&i| &self.entries[i].origin_query)
    }

    /// URL在集合中的位置
    pub fn position(&self, url: &str) -> Option<usize> {
        self.index.get(url).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalLink> {
        self.entries.iter()
    }

    /// URL到来源查询的映射
    pub fn query_map(&self) -> HashMap<String, Query> {
        self.entries
            .iter()
            .map(|e| (e.url.clone(), e.origin_query.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CanonicalLinkSet {
    type Item = &'a CanonicalLink;
    type IntoIter = std::slice::Iter<'a, CanonicalLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

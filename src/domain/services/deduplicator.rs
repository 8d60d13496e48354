// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::link::{CandidateLink, CanonicalLinkSet};
use crate::utils::url_utils::UrlCanonicalizer;
use tracing::debug;

/// 链接去重器
///
/// 合并所有查询的候选链接，按规范URL去重。
/// 先到先得：同一规范URL再次出现时丢弃，保留首次出现时的查询。
pub struct Deduplicator {
    canonicalizer: UrlCanonicalizer,
}

impl Deduplicator {
    pub fn new(canonicalizer: UrlCanonicalizer) -> Self {
        Self { canonicalizer }
    }

    /// 合并候选链接列表
    ///
    /// # 参数
    ///
    /// * `lists` - 按查询顺序排列的候选链接列表
    ///
    /// # 返回值
    ///
    /// 规范链接集合，迭代顺序为首次出现顺序
    pub fn merge<I>(&self, lists: I) -> CanonicalLinkSet
    where
        I: IntoIterator<Item = Vec<CandidateLink>>,
    {
        let mut set = CanonicalLinkSet::new();
        let mut total = 0usize;

        for candidate in lists.into_iter().flatten() {
            total += 1;
            let canonical = self.canonicalizer.canonicalize(&candidate.url);
            if canonical.is_empty() {
                continue;
            }
            if !set.insert(canonical, candidate.origin_query) {
                debug!("Duplicate link dropped: {}", candidate.url);
            }
        }

        debug!("Deduplicated {} candidate links into {}", total, set.len());
        set
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(UrlCanonicalizer::default())
    }
}

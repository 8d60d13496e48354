// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::query::Query;

/// 查询枚举器
///
/// 由关键词列表和地区列表生成全部搜索查询
pub struct QueryEnumerator;

impl QueryEnumerator {
    /// 生成关键词与地区的笛卡尔积
    ///
    /// 以地区为外层循环：先生成第一个地区的全部关键词，再到下一个地区。
    /// 不做任何过滤，没有失败情况。
    pub fn enumerate<K, R>(keywords: &[K], regions: &[R]) -> Vec<Query>
    where
        K: AsRef<str>,
        R: AsRef<str>,
    {
        regions
            .iter()
            .flat_map(|region| {
                keywords
                    .iter()
                    .map(move |keyword| Query::new(keyword.as_ref(), region.as_ref()))
            })
            .collect()
    }
}

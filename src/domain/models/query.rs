// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 搜索查询
///
/// 一次发现运行的来源标识：由搜索关键词和地区组成。
/// 枚举后不可变，整个运行期间只读。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// 搜索关键词
    pub keyword: String,
    /// 搜索地区
    pub region: String,
}

impl Query {
    /// 创建新的查询
    pub fn new(keyword: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.keyword, self.region)
    }
}

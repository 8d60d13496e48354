// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{is_not_found, JobDetail};

/// 地区过滤器
///
/// 不区分大小写的子串匹配：地点包含任一排除词即被排除，
/// 因此 "California" 会匹配 "Greater Los Angeles Area, California"。
/// 地点为占位值时总是保留。
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    exclusions: Vec<String>,
}

impl LocationFilter {
    /// 创建地区过滤器，空白的排除词会被忽略
    pub fn new<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exclusions: exclusions
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// 地点是否被排除
    pub fn is_excluded(&self, location: &str) -> bool {
        if is_not_found(location) {
            return false;
        }
        let location = location.to_lowercase();
        self.exclusions.iter().any(|term| location.contains(term.as_str()))
    }

    /// 是否保留该职位
    pub fn keep(&self, detail: &JobDetail) -> bool {
        !self.is_excluded(&detail.location)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::Serialize;

/// 技能计数行
///
/// `count` 是描述中包含该技能词的不同职位数，而不是出现次数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCountRow {
    pub date: NaiveDate,
    pub tag: String,
    pub skill: String,
    pub count: usize,
}

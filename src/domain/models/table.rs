// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 输出表
///
/// 交给结果存储的表头加数据行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// 表名（工作表名或文件名）
    pub name: String,
    /// 表头
    pub header: Vec<String>,
    /// 数据行，每行长度与表头一致
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

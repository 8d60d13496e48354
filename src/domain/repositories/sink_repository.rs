// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::table::Table;
use async_trait::async_trait;
use thiserror::Error;

/// 结果存储错误类型
#[derive(Error, Debug)]
pub enum SinkError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV读写错误
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// 存储错误
    #[error("Sink error: {0}")]
    Other(String),
}

/// 结果存储仓库特质
///
/// 定义输出表的写入接口，表名决定写入位置
#[async_trait]
pub trait SinkRepository: Send + Sync {
    /// 用表的内容替换同名表的全部内容（含表头）
    async fn overwrite(&self, table: &Table) -> Result<(), SinkError>;

    /// 在同名表末尾追加数据行
    ///
    /// 表不存在、为空或表头不一致时，先写入表头再写入数据行
    async fn append(&self, table: &Table) -> Result<(), SinkError>;
}

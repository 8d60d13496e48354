// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::table::Table;
use crate::domain::repositories::sink_repository::{SinkError, SinkRepository};
use async_trait::async_trait;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV文件结果存储
///
/// 每张表写入 `<output_dir>/<表名>.csv`，第一行为表头
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 表对应的文件路径
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.csv", name))
    }

    fn write_table(path: &Path, table: &Table) -> Result<(), SinkError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_writer(File::create(path)?);
        writer.write_record(&table.header)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 读取已有文件的表头，文件不存在或为空时返回None
    fn read_header(path: &Path) -> Result<Option<Vec<String>>, SinkError> {
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        match reader.records().next() {
            Some(record) => Ok(Some(record?.iter().map(|s| s.to_string()).collect())),
            None => Ok(None),
        }
    }

    fn append_table(path: &Path, table: &Table) -> Result<(), SinkError> {
        if Self::read_header(path)?.as_ref() != Some(&table.header) {
            debug!("Header missing or changed, rewriting {}", path.display());
            return Self::write_table(path, table);
        }

        let file = OpenOptions::new().append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    async fn run_blocking<F>(&self, table: &Table, op: F) -> Result<(), SinkError>
    where
        F: FnOnce(&Path, &Table) -> Result<(), SinkError> + Send + 'static,
    {
        let path = self.table_path(&table.name);
        let table = table.clone();
        tokio::task::spawn_blocking(move || op(&path, &table))
            .await
            .map_err(|e| SinkError::Other(e.to_string()))?
    }
}

#[async_trait]
impl SinkRepository for CsvSink {
    async fn overwrite(&self, table: &Table) -> Result<(), SinkError> {
        self.run_blocking(table, Self::write_table).await
    }

    async fn append(&self, table: &Table) -> Result<(), SinkError> {
        self.run_blocking(table, Self::append_table).await
    }
}

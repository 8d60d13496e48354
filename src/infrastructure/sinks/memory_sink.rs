// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::table::Table;
use crate::domain::repositories::sink_repository::{SinkError, SinkRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// 内存结果存储
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<HashMap<String, Table>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取表的当前内容
    pub fn table(&self, name: &str) -> Option<Table> {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.get(name).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Table>>, SinkError> {
        self.tables
            .lock()
            .map_err(|e| SinkError::Other(e.to_string()))
    }
}

#[async_trait]
impl SinkRepository for MemorySink {
    async fn overwrite(&self, table: &Table) -> Result<(), SinkError> {
        self.lock()?.insert(table.name.clone(), table.clone());
        Ok(())
    }

    async fn append(&self, table: &Table) -> Result<(), SinkError> {
        let mut tables = self.lock()?;
        match tables.get_mut(&table.name) {
            Some(existing) if existing.header == table.header => {
                existing.rows.extend(table.rows.iter().cloned());
            }
            _ => {
                tables.insert(table.name.clone(), table.clone());
            }
        }
        Ok(())
    }
}

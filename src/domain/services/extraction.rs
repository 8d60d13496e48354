// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::JobDetail;
use url::Url;

/// 列表页解析器
///
/// 从列表页文档中提取职位链接。解析器针对具体来源实现，
/// 发现逻辑只依赖这个接口。
pub trait ListingParser: Send + Sync {
    /// 提取列表页中的职位链接
    ///
    /// # 参数
    ///
    /// * `html` - 列表页内容
    /// * `base_url` - 列表页URL，用于解析相对链接
    ///
    /// # 返回值
    ///
    /// 按文档顺序排列的绝对URL，没有链接时返回空列表
    fn parse_links(&self, html: &str, base_url: &Url) -> Vec<String>;
}

/// 详情字段提取器
///
/// 从详情页文档中提取标题、公司、地点和描述。
/// 找不到的字段取占位值，不会失败。
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, html: &str) -> JobDetail;
}

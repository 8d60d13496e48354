// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含扫描流程各阶段的业务逻辑：
/// - 查询枚举（query_enumerator）：关键词与地区的笛卡尔积
/// - 链接发现（link_discoverer）：逐页请求列表接口收集职位链接
/// - 链接去重（deduplicator）：按规范URL合并候选链接
/// - 详情抓取（detail_fetcher）：分批并发抓取详情页
/// - 地区过滤（location_filter）：排除指定地区的职位
/// - 分类（classifier）：匹配过滤关键词和技能词
/// - 结果汇总（result_aggregator）：生成输出表并写入结果存储
///
/// 解析接口（extraction）定义了列表页解析器和详情字段提取器，
/// 具体实现由基础设施层提供。
pub mod classifier;
pub mod deduplicator;
pub mod detail_fetcher;
pub mod extraction;
pub mod link_discoverer;
pub mod location_filter;
pub mod query_enumerator;
pub mod result_aggregator;

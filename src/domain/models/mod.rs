// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 查询（query）：关键词与地区组成的搜索条件
/// - 链接（link）：候选链接与去重后的规范链接集合
/// - 职位（job）：职位详情与分类后的职位记录
/// - 分类体系（taxonomy）：技能词到分类的映射
/// - 技能计数（skill_count）：按技能统计的职位数
/// - 输出表（table）：交给结果存储的表格
pub mod job;
pub mod link;
pub mod query;
pub mod skill_count;
pub mod table;
pub mod taxonomy;

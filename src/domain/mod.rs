// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：查询、链接、职位记录和分类体系
/// - 仓库接口（repositories）：结果存储抽象接口
/// - 服务（services）：扫描流程各阶段的领域服务
///
/// 领域层不依赖于任何外部实现，解析器和存储由基础设施层注入。
pub mod models;
pub mod repositories;
pub mod services;

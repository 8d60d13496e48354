// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含扫描用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供解析器和结果存储的具体实现
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括查询、列表接口、抓取、过滤、分类体系和输出等配置
pub mod settings;

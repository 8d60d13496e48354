// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含应用程序的用例实现，负责把领域服务编排成完整的扫描流程
pub mod use_cases;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 解析器（extractors）：列表页解析器和详情字段提取器的具体实现
/// - 结果存储（sinks）：领域结果存储接口的具体实现
/// - 指标（metrics）：Prometheus记录器
///
/// 基础设施层依赖于领域层的抽象接口，领域层不依赖具体实现。
pub mod extractors;
pub mod metrics;
pub mod sinks;

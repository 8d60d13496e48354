// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 结果存储实现
///
/// - CSV文件存储（csv_sink）：每张表对应输出目录下的一个CSV文件
/// - 内存存储（memory_sink）：测试和试运行使用
pub mod csv_sink;
pub mod memory_sink;

// 该文件是 Wangshan （望山） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use clap::Parser;

/// Wangshan 服务参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 监听地址
  #[arg(long, default_value = "0.0.0.0", value_name = "HOST")]
  pub host: String,

  /// 监听端口
  #[arg(long, default_value = "8000", value_name = "PORT")]
  pub port: u16,

  /// 默认置信度阈值 (0.0 - 1.0)，可被请求中的 confidence 字段覆盖
  #[arg(long, default_value_t = crate::server::DEFAULT_CONFIDENCE, value_name = "THRESHOLD")]
  pub confidence: f32,
}

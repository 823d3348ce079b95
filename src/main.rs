// 该文件是 Wangshan （望山） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use wangshan::annotate::Annotator;
use wangshan::args::Args;
use wangshan::model::Model;
use wangshan::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  info!("监听地址: {}:{}", args.host, args.port);
  info!("默认置信度阈值: {}", args.confidence);

  let models = build_models();
  if models.is_empty() {
    anyhow::bail!("没有编译任何推理后端");
  }
  info!("已加载 {} 个模型", models.len());

  let state = Arc::new(AppState {
    models,
    annotator: Annotator::new(),
    default_confidence: args.confidence,
  });

  let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("服务已启动");

  axum::serve(listener, server::router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("服务已退出");
  Ok(())
}

/// 为目录中的每个模型标识构建推理后端
fn build_models() -> HashMap<String, Arc<dyn Model>> {
  #[allow(unused_mut)]
  let mut models: HashMap<String, Arc<dyn Model>> = HashMap::new();

  #[cfg(feature = "model_demo")]
  {
    info!("未配置真实推理后端，使用演示模型");
    for info in wangshan::catalog::MODELS.iter() {
      models.insert(
        info.id.to_string(),
        Arc::new(wangshan::model::DemoModel::sample()),
      );
    }
  }

  models
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!("无法监听退出信号: {}", e);
    return;
  }
  info!("收到退出信号，正在关闭...");
}

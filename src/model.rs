// 该文件是 Wangshan （望山） 项目的一部分。
// src/model.rs - 推理模型接口
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use image::RgbImage;
use thiserror::Error;

use crate::bbox::PixelBox;

/// 模型输出的一个原始检测框（像素坐标）
#[derive(Debug, Clone, Copy)]
pub struct RawBox {
  pub x1: f32,
  pub y1: f32,
  pub x2: f32,
  pub y2: f32,
  pub confidence: f32,
  pub class_id: usize,
}

impl RawBox {
  pub fn pixel_box(&self) -> PixelBox {
    PixelBox {
      x1: self.x1,
      y1: self.y1,
      x2: self.x2,
      y2: self.y2,
    }
  }
}

#[derive(Error, Debug)]
pub enum ModelError {
  #[error("推理失败: {0}")]
  Inference(String),
  #[error("输入图像无效: {0}")]
  InvalidInput(String),
}

/// 推理模型接口。
///
/// 置信度阈值作为调用参数传入，而不是保存在模型的共享状态中，
/// 并发请求之间因此互不干扰。实现可以自行按阈值预过滤，
/// 检测流水线仍会再次应用阈值。
pub trait Model: Send + Sync {
  /// 对一幅图像执行推理，返回原始检测框
  fn infer(&self, image: &RgbImage, confidence: f32) -> Result<Vec<RawBox>, ModelError>;

  /// 类别索引到名称的映射表
  fn class_names(&self) -> &'static [&'static str];
}

#[cfg(feature = "model_demo")]
mod demo;
#[cfg(feature = "model_demo")]
pub use self::demo::{DemoModel, SceneBox};

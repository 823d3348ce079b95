// 该文件是 Wangshan （望山） 项目的一部分。
// src/pipeline.rs - 检测流水线
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use image::RgbImage;
use serde::Serialize;
use tracing::debug;

use crate::bbox::NormBox;
use crate::model::{Model, ModelError};

/// 一个检测结果：类别、置信度与归一化边界框。
/// 由流水线创建后不再修改。
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
  pub class_name: String,
  pub confidence: f32,
  pub bbox: NormBox,
}

/// 对一幅图像执行检测。
///
/// 调用模型、按阈值过滤、将类别索引映射为名称，
/// 并把像素坐标框裁剪到图像范围后归一化。
/// 检测结果保持模型输出的顺序，不重新排序。
/// 模型失败时错误原样向上传播，不做重试。
pub fn detect(
  model: &dyn Model,
  image: &RgbImage,
  confidence: f32,
) -> Result<Vec<Detection>, ModelError> {
  let (width, height) = image.dimensions();
  let raw_boxes = model.infer(image, confidence)?;
  debug!("模型返回 {} 个原始检测框", raw_boxes.len());

  let names = model.class_names();
  let mut detections = Vec::with_capacity(raw_boxes.len());

  for raw in raw_boxes {
    // 模型可能未按阈值过滤，这里再次应用
    if raw.confidence < confidence {
      continue;
    }

    let class_name = names
      .get(raw.class_id)
      .copied()
      .unwrap_or("unknown")
      .to_string();
    let bbox = raw
      .pixel_box()
      .clamp_to(width, height)
      .normalize(width, height);

    detections.push(Detection {
      class_name,
      confidence: raw.confidence,
      bbox,
    });
  }

  debug!("阈值 {} 过滤后剩余 {} 个检测", confidence, detections.len());
  Ok(detections)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::RawBox;

  /// 返回固定检测框的脚本化模型
  struct ScriptedModel {
    boxes: Vec<RawBox>,
  }

  impl Model for ScriptedModel {
    fn infer(&self, _image: &RgbImage, _confidence: f32) -> Result<Vec<RawBox>, ModelError> {
      Ok(self.boxes.clone())
    }

    fn class_names(&self) -> &'static [&'static str] {
      &["person", "bicycle", "car"]
    }
  }

  struct FailingModel;

  impl Model for FailingModel {
    fn infer(&self, _image: &RgbImage, _confidence: f32) -> Result<Vec<RawBox>, ModelError> {
      Err(ModelError::Inference("引擎故障".to_string()))
    }

    fn class_names(&self) -> &'static [&'static str] {
      &[]
    }
  }

  fn raw(confidence: f32, class_id: usize) -> RawBox {
    RawBox {
      x1: 10.0,
      y1: 20.0,
      x2: 50.0,
      y2: 120.0,
      confidence,
      class_id,
    }
  }

  #[test]
  fn filters_by_threshold_and_keeps_order() {
    let model = ScriptedModel {
      boxes: vec![raw(0.4, 0), raw(0.9, 2), raw(0.6, 1), raw(0.95, 0)],
    };
    let image = RgbImage::new(100, 200);

    let detections = detect(&model, &image, 0.5).unwrap();
    let summary: Vec<(&str, f32)> = detections
      .iter()
      .map(|d| (d.class_name.as_str(), d.confidence))
      .collect();
    assert_eq!(
      summary,
      [("car", 0.9), ("bicycle", 0.6), ("person", 0.95)]
    );
  }

  #[test]
  fn threshold_is_inclusive() {
    let model = ScriptedModel {
      boxes: vec![raw(0.5, 0)],
    };
    let image = RgbImage::new(100, 200);
    assert_eq!(detect(&model, &image, 0.5).unwrap().len(), 1);
  }

  #[test]
  fn normalizes_known_box() {
    let model = ScriptedModel {
      boxes: vec![raw(0.8, 0)],
    };
    let image = RgbImage::new(100, 200);

    let detections = detect(&model, &image, 0.5).unwrap();
    let bbox = detections[0].bbox;
    assert!((bbox.x - 0.10).abs() < 1e-6);
    assert!((bbox.y - 0.10).abs() < 1e-6);
    assert!((bbox.w - 0.40).abs() < 1e-6);
    assert!((bbox.h - 0.50).abs() < 1e-6);
  }

  #[test]
  fn clamps_out_of_bounds_boxes() {
    let model = ScriptedModel {
      boxes: vec![RawBox {
        x1: -10.0,
        y1: -5.0,
        x2: 150.0,
        y2: 250.0,
        confidence: 0.8,
        class_id: 0,
      }],
    };
    let image = RgbImage::new(100, 200);

    let bbox = detect(&model, &image, 0.5).unwrap()[0].bbox;
    assert!(bbox.x >= 0.0 && bbox.y >= 0.0);
    assert!(bbox.x + bbox.w <= 1.0 + 1e-6);
    assert!(bbox.y + bbox.h <= 1.0 + 1e-6);
  }

  #[test]
  fn unknown_class_id_maps_to_unknown() {
    let model = ScriptedModel {
      boxes: vec![raw(0.8, 42)],
    };
    let image = RgbImage::new(100, 200);
    assert_eq!(detect(&model, &image, 0.5).unwrap()[0].class_name, "unknown");
  }

  #[test]
  fn model_failure_propagates() {
    let image = RgbImage::new(100, 200);
    assert!(detect(&FailingModel, &image, 0.5).is_err());
  }
}

// 该文件是 Wangshan （望山） 项目的一部分。
// src/model/demo.rs - 演示模型
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use image::RgbImage;
use tracing::debug;

use crate::catalog::COCO_CLASSES;
use crate::model::{Model, ModelError, RawBox};

/// 演示场景中的一个对象，坐标相对图像宽高
#[derive(Debug, Clone, Copy)]
pub struct SceneBox {
  pub bbox: [f32; 4], // [x, y, w, h]
  pub confidence: f32,
  pub class_id: usize,
}

/// 演示模型：不做真实推理，返回按图像尺寸缩放的固定场景。
/// 用于开发环境与集成测试；真实推理后端实现同一个 Model 接口。
pub struct DemoModel {
  scene: Vec<SceneBox>,
}

impl DemoModel {
  /// 固定的示例场景：一个行人、一辆车和一只低置信度的鸟
  pub fn sample() -> Self {
    DemoModel {
      scene: vec![
        SceneBox {
          bbox: [0.10, 0.20, 0.35, 0.60],
          confidence: 0.88,
          class_id: 0, // person
        },
        SceneBox {
          bbox: [0.55, 0.50, 0.30, 0.25],
          confidence: 0.62,
          class_id: 2, // car
        },
        SceneBox {
          bbox: [0.40, 0.05, 0.10, 0.10],
          confidence: 0.35,
          class_id: 14, // bird
        },
      ],
    }
  }

  /// 使用自定义场景构造，供测试脚本化检测结果
  pub fn with_scene(scene: Vec<SceneBox>) -> Self {
    DemoModel { scene }
  }
}

impl Model for DemoModel {
  fn infer(&self, image: &RgbImage, _confidence: f32) -> Result<Vec<RawBox>, ModelError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
      return Err(ModelError::InvalidInput("图像尺寸为零".to_string()));
    }

    let w = width as f32;
    let h = height as f32;

    // 阈值过滤交给流水线，这里原样返回全部场景对象
    let boxes = self
      .scene
      .iter()
      .map(|object| {
        let [x, y, bw, bh] = object.bbox;
        RawBox {
          x1: x * w,
          y1: y * h,
          x2: (x + bw) * w,
          y2: (y + bh) * h,
          confidence: object.confidence,
          class_id: object.class_id,
        }
      })
      .collect::<Vec<_>>();

    debug!("演示模型返回 {} 个检测框", boxes.len());
    Ok(boxes)
  }

  fn class_names(&self) -> &'static [&'static str] {
    &COCO_CLASSES
  }
}

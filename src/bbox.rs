// 该文件是 Wangshan （望山） 项目的一部分。
// src/bbox.rs - 边界框坐标转换
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use serde::{Serialize, Serializer};

/// 像素坐标边界框，原点在图像左上角
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
  pub x1: f32,
  pub y1: f32,
  pub x2: f32,
  pub y2: f32,
}

/// 归一化边界框 (x, y, w, h)，各分量相对图像宽高，范围 [0, 1]。
/// 归一化坐标与具体分辨率无关，是跨越 API 边界的表示形式。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormBox {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

impl PixelBox {
  /// 将边界框裁剪到图像范围内。
  /// 裁剪后归一化满足 x + w <= 1 且 y + h <= 1。
  pub fn clamp_to(&self, width: u32, height: u32) -> PixelBox {
    let w = width as f32;
    let h = height as f32;
    PixelBox {
      x1: self.x1.clamp(0.0, w),
      y1: self.y1.clamp(0.0, h),
      x2: self.x2.clamp(0.0, w),
      y2: self.y2.clamp(0.0, h),
    }
  }

  /// 像素坐标转归一化坐标。
  /// 要求 width > 0 且 height > 0，零尺寸图像由调用方负责避免。
  pub fn normalize(&self, width: u32, height: u32) -> NormBox {
    let w = width as f32;
    let h = height as f32;
    NormBox {
      x: self.x1 / w,
      y: self.y1 / h,
      w: (self.x2 - self.x1) / w,
      h: (self.y2 - self.y1) / h,
    }
  }
}

impl NormBox {
  /// 归一化坐标转像素坐标（四舍五入），绘制前调用。
  /// 返回 [x1, y1, x2, y2]。
  pub fn to_pixels(&self, width: u32, height: u32) -> [i32; 4] {
    let w = width as f32;
    let h = height as f32;
    [
      (self.x * w).round() as i32,
      (self.y * h).round() as i32,
      ((self.x + self.w) * w).round() as i32,
      ((self.y + self.h) * h).round() as i32,
    ]
  }
}

// API 中边界框序列化为 [x, y, w, h] 数组
impl Serialize for NormBox {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    [self.x, self.y, self.w, self.h].serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_known_box() {
    // 100x200 图像上的 (10, 20, 50, 120) 框
    let pixel = PixelBox {
      x1: 10.0,
      y1: 20.0,
      x2: 50.0,
      y2: 120.0,
    };
    let norm = pixel.normalize(100, 200);
    assert!((norm.x - 0.10).abs() < 1e-6);
    assert!((norm.y - 0.10).abs() < 1e-6);
    assert!((norm.w - 0.40).abs() < 1e-6);
    assert!((norm.h - 0.50).abs() < 1e-6);
  }

  #[test]
  fn pixel_round_trip_within_one_pixel() {
    let boxes = [
      (10.0, 20.0, 50.0, 120.0, 100u32, 200u32),
      (0.0, 0.0, 640.0, 480.0, 640, 480),
      (33.0, 7.0, 121.0, 99.0, 123, 457),
      (1.0, 1.0, 2.0, 2.0, 3, 3),
    ];
    for (x1, y1, x2, y2, w, h) in boxes {
      let pixel = PixelBox { x1, y1, x2, y2 };
      let [px1, py1, px2, py2] = pixel.normalize(w, h).to_pixels(w, h);
      assert!((px1 as f32 - x1).abs() <= 1.0);
      assert!((py1 as f32 - y1).abs() <= 1.0);
      assert!((px2 as f32 - x2).abs() <= 1.0);
      assert!((py2 as f32 - y2).abs() <= 1.0);
    }
  }

  #[test]
  fn clamp_keeps_invariant() {
    // 模型可能给出略微越界的框
    let pixel = PixelBox {
      x1: -5.0,
      y1: 10.0,
      x2: 130.0,
      y2: 250.0,
    };
    let norm = pixel.clamp_to(100, 200).normalize(100, 200);
    assert!(norm.x >= 0.0 && norm.y >= 0.0);
    assert!(norm.x + norm.w <= 1.0 + 1e-6);
    assert!(norm.y + norm.h <= 1.0 + 1e-6);
  }

  #[test]
  fn serializes_as_array() {
    let norm = NormBox {
      x: 0.1,
      y: 0.2,
      w: 0.3,
      h: 0.4,
    };
    let json = serde_json::to_value(norm).unwrap();
    let array = json.as_array().unwrap();
    assert_eq!(array.len(), 4);
    for (value, expected) in array.iter().zip([0.1, 0.2, 0.3, 0.4]) {
      assert!((value.as_f64().unwrap() - expected).abs() < 1e-6);
    }
  }
}

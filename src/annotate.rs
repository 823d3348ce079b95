// 该文件是 Wangshan （望山） 项目的一部分。
// src/annotate.rs - 检测结果绘制
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::palette;
use crate::pipeline::Detection;

// 文本渲染常量
const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_TEXT_HEIGHT: i32 = 24;
const LABEL_CHAR_WIDTH: f32 = 11.0; // 每字符平均宽度（粗略估计）
const LABEL_TEXT_VERTICAL_PADDING: i32 = 2;
const LABEL_TEXT_COLOR: [u8; 3] = [255, 255, 255]; // 白色文本

/// 检测结果绘制工具：在图像上画出边界框与类别标签
pub struct Annotator {
  font: FontArc,
  font_scale: PxScale,
}

impl Default for Annotator {
  fn default() -> Self {
    Self::new()
  }
}

impl Annotator {
  pub fn new() -> Self {
    let font_data = include_bytes!("../assets/DejaVuSans.ttf"); // default font
    let font = FontArc::try_from_slice(font_data).expect("无法加载嵌入的字体文件");

    Self {
      font,
      font_scale: PxScale::from(LABEL_FONT_SIZE),
    }
  }

  /// 按流水线顺序把检测结果绘制到图像上（原地修改）。
  /// 每个检测：按图像实际尺寸换算像素坐标，查类别颜色，
  /// 画边框，再在框上方画标签底色与文本。
  pub fn annotate(&self, image: &mut RgbImage, detections: &[Detection]) {
    for detection in detections {
      self.draw_detection(image, detection);
    }
  }

  fn draw_detection(&self, image: &mut RgbImage, detection: &Detection) {
    let (width, height) = image.dimensions();
    let [x1, y1, x2, y2] = detection.bbox.to_pixels(width, height);

    let x1 = x1.clamp(0, width as i32 - 1);
    let y1 = y1.clamp(0, height as i32 - 1);
    let x2 = x2.clamp(0, width as i32 - 1);
    let y2 = y2.clamp(0, height as i32 - 1);

    if x1 >= x2 || y1 >= y2 {
      return;
    }

    let color = Rgb(palette::class_color(&detection.class_name));

    // 边框（两层以加粗到 2 像素）
    let outer = Rect::at(x1, y1).of_size((x2 - x1) as u32, (y2 - y1) as u32);
    draw_hollow_rect_mut(image, outer, color);
    if x2 - x1 > 2 && y2 - y1 > 2 {
      let inner = Rect::at(x1 + 1, y1 + 1).of_size((x2 - x1 - 2) as u32, (y2 - y1 - 2) as u32);
      draw_hollow_rect_mut(image, inner, color);
    }

    // 标签文本
    let label = format!("{} {:.2}", detection.class_name, detection.confidence);

    // 估算文本大小（粗略估计）
    let text_width = (label.len() as f32 * LABEL_CHAR_WIDTH) as i32;
    let text_height = LABEL_TEXT_HEIGHT;

    // 标签底色位于边框上方，贴近顶部时收回画布内
    let label_x = x1.max(0);
    let label_y = (y1 - text_height).max(0);

    let max_width = (width as i32 - label_x).max(0);
    let label_width = text_width.min(max_width) as u32;
    let label_height = text_height as u32;

    if label_width > 0 && label_height > 0 {
      let background = Rect::at(label_x, label_y).of_size(label_width, label_height);
      draw_filled_rect_mut(image, background, color);

      draw_text_mut(
        image,
        Rgb(LABEL_TEXT_COLOR),
        label_x,
        label_y + LABEL_TEXT_VERTICAL_PADDING,
        self.font_scale,
        &self.font,
        &label,
      );
    }
  }
}

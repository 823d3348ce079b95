// 该文件是 Wangshan （望山） 项目的一部分。
// src/palette.rs - 类别颜色分配
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

/// 常见类别的固定配色（RGB），保证视觉上容易区分
const CLASS_COLOR_OVERRIDES: [(&str, [u8; 3]); 6] = [
  ("person", [255, 0, 0]),
  ("car", [0, 0, 255]),
  ("truck", [128, 0, 255]),
  ("motorcycle", [0, 255, 0]),
  ("bicycle", [128, 0, 128]),
  ("bus", [255, 255, 0]),
];

/// 类别名称的多项式哈希 (h = h * 31 + b)。
/// 哈希函数固定不变：颜色的跨进程稳定性依赖于它，
/// 不能使用带随机种子的运行时哈希。
fn hash_name(name: &str) -> u32 {
  name
    .bytes()
    .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

/// 返回类别对应的稳定颜色。
/// 表内类别使用固定配色，其余类别由名称哈希推导三个通道。
/// 不同类别哈希到相近颜色的情况属于已知限制，不做处理。
pub fn class_color(name: &str) -> [u8; 3] {
  for (known, color) in CLASS_COLOR_OVERRIDES {
    if known == name {
      return color;
    }
  }

  let hash = hash_name(name) % 255;
  [
    ((hash * 17) % 255) as u8,
    ((hash * 43) % 255) as u8,
    ((hash * 71) % 255) as u8,
  ]
}

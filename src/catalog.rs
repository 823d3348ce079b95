// 该文件是 Wangshan （望山） 项目的一部分。
// src/catalog.rs - 模型目录与类别表
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use serde::Serialize;

/// 可用模型的描述信息
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelInfo {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
}

/// 模型目录是固定的静态列表，不依赖外部状态
pub const MODELS: [ModelInfo; 5] = [
  ModelInfo {
    id: "yolov8n",
    name: "YOLOv8 Nano",
    description: "Smallest and fastest model",
  },
  ModelInfo {
    id: "yolov8s",
    name: "YOLOv8 Small",
    description: "Small model, good balance",
  },
  ModelInfo {
    id: "yolov8m",
    name: "YOLOv8 Medium",
    description: "Medium-sized model",
  },
  ModelInfo {
    id: "yolov8l",
    name: "YOLOv8 Large",
    description: "Large model, high accuracy",
  },
  ModelInfo {
    id: "yolov8x",
    name: "YOLOv8 XLarge",
    description: "Largest, most accurate model",
  },
];

/// 按标识符查找模型
pub fn find(id: &str) -> Option<&'static ModelInfo> {
  MODELS.iter().find(|info| info.id == id)
}

/// COCO 数据集类别名称
pub const COCO_CLASSES: [&str; 80] = [
  "person",
  "bicycle",
  "car",
  "motorcycle",
  "airplane",
  "bus",
  "train",
  "truck",
  "boat",
  "traffic light",
  "fire hydrant",
  "stop sign",
  "parking meter",
  "bench",
  "bird",
  "cat",
  "dog",
  "horse",
  "sheep",
  "cow",
  "elephant",
  "bear",
  "zebra",
  "giraffe",
  "backpack",
  "umbrella",
  "handbag",
  "tie",
  "suitcase",
  "frisbee",
  "skis",
  "snowboard",
  "sports ball",
  "kite",
  "baseball bat",
  "baseball glove",
  "skateboard",
  "surfboard",
  "tennis racket",
  "bottle",
  "wine glass",
  "cup",
  "fork",
  "knife",
  "spoon",
  "bowl",
  "banana",
  "apple",
  "sandwich",
  "orange",
  "broccoli",
  "carrot",
  "hot dog",
  "pizza",
  "donut",
  "cake",
  "chair",
  "couch",
  "potted plant",
  "bed",
  "dining table",
  "toilet",
  "tv",
  "laptop",
  "mouse",
  "remote",
  "keyboard",
  "cell phone",
  "microwave",
  "oven",
  "toaster",
  "sink",
  "refrigerator",
  "book",
  "clock",
  "vase",
  "scissors",
  "teddy bear",
  "hair drier",
  "toothbrush",
];

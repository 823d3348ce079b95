// 该文件是 Wangshan （望山） 项目的一部分。
// src/server.rs - HTTP 服务
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, RgbImage};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::annotate::Annotator;
use crate::catalog::{self, ModelInfo};
use crate::model::{Model, ModelError};
use crate::pipeline::{self, Detection};

/// 请求未携带 confidence 字段时的默认阈值
pub const DEFAULT_CONFIDENCE: f32 = 0.5;
/// 请求未携带 model 字段时的默认模型
pub const DEFAULT_MODEL: &str = "yolov8n";

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("请求格式错误: {0}")]
  BadRequest(String),
  #[error("无法解码上传的图像: {0}")]
  ImageDecode(image::ImageError),
  #[error("未知模型: {0}")]
  UnknownModel(String),
  #[error("{0}")]
  Inference(#[from] ModelError),
  #[error("图像编码失败: {0}")]
  ImageEncode(image::ImageError),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::ImageDecode(_) | ApiError::UnknownModel(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Inference(_) | ApiError::ImageEncode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

// 错误统一序列化为 { "error": "..." }
impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!("请求处理失败: {}", self);
    }
    let body = Json(serde_json::json!({ "error": self.to_string() }));
    (status, body).into_response()
  }
}

/// 服务共享状态。
/// 置信度阈值逐请求传入推理调用，共享状态本身不可变。
pub struct AppState {
  pub models: HashMap<String, Arc<dyn Model>>,
  pub annotator: Annotator,
  pub default_confidence: f32,
}

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/detect", post(detect_image))
    .route("/models", get(list_models))
    .with_state(state)
}

#[derive(Serialize)]
pub struct DetectResponse {
  pub results: Vec<Detection>,
  pub processed_image: Option<String>,
}

#[derive(Serialize)]
struct ModelsResponse {
  models: &'static [ModelInfo],
}

/// GET /models - 返回固定的模型目录
async fn list_models() -> Json<ModelsResponse> {
  Json(ModelsResponse {
    models: &catalog::MODELS,
  })
}

/// POST /detect - 对上传的图像执行目标检测
async fn detect_image(
  State(state): State<Arc<AppState>>,
  mut multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
  let mut file = None;
  let mut confidence = state.default_confidence;
  let mut model_id = DEFAULT_MODEL.to_string();
  let mut return_image = false;

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(format!("multipart 解析失败: {e}")))?
  {
    let name = field.name().map(str::to_string);
    match name.as_deref() {
      Some("file") => {
        let data = field
          .bytes()
          .await
          .map_err(|e| ApiError::BadRequest(format!("读取 file 字段失败: {e}")))?;
        file = Some(data);
      }
      Some("confidence") => {
        let text = read_text_field(field, "confidence").await?;
        confidence = text
          .trim()
          .parse()
          .map_err(|_| ApiError::BadRequest(format!("置信度阈值无效: {text}")))?;
      }
      Some("model") => {
        model_id = read_text_field(field, "model").await?;
      }
      Some("return_image") => {
        let text = read_text_field(field, "return_image").await?;
        return_image = parse_bool(&text)?;
      }
      _ => {} // 忽略未知字段
    }
  }

  let bytes = file.ok_or_else(|| ApiError::BadRequest("缺少 file 字段".to_string()))?;

  if catalog::find(&model_id).is_none() {
    return Err(ApiError::UnknownModel(model_id));
  }
  let model = state
    .models
    .get(&model_id)
    .ok_or_else(|| ApiError::UnknownModel(model_id.clone()))?;

  let mut image = image::load_from_memory(&bytes)
    .map_err(ApiError::ImageDecode)?
    .to_rgb8();

  let results = pipeline::detect(model.as_ref(), &image, confidence)?;
  info!(
    "模型 {} 检测到 {} 个对象（阈值 {}）",
    model_id,
    results.len(),
    confidence
  );

  let processed_image = if return_image {
    state.annotator.annotate(&mut image, &results);
    Some(encode_jpeg_base64(&image)?)
  } else {
    None
  };

  Ok(Json(DetectResponse {
    results,
    processed_image,
  }))
}

async fn read_text_field(
  field: axum::extract::multipart::Field<'_>,
  name: &str,
) -> Result<String, ApiError> {
  field
    .text()
    .await
    .map_err(|e| ApiError::BadRequest(format!("读取 {name} 字段失败: {e}")))
}

fn parse_bool(text: &str) -> Result<bool, ApiError> {
  match text.trim() {
    "true" | "True" | "1" => Ok(true),
    "false" | "False" | "0" | "" => Ok(false),
    other => Err(ApiError::BadRequest(format!("布尔字段无效: {other}"))),
  }
}

fn encode_jpeg_base64(image: &RgbImage) -> Result<String, ApiError> {
  let mut buffer = Cursor::new(Vec::new());
  image
    .write_to(&mut buffer, ImageFormat::Jpeg)
    .map_err(ApiError::ImageEncode)?;
  Ok(BASE64.encode(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_bool_accepted_forms() {
    assert!(parse_bool("true").unwrap());
    assert!(parse_bool("1").unwrap());
    assert!(!parse_bool("false").unwrap());
    assert!(!parse_bool("").unwrap());
    assert!(parse_bool("maybe").is_err());
  }

  #[test]
  fn encode_produces_decodable_jpeg() {
    let image = RgbImage::from_pixel(32, 16, image::Rgb([10, 120, 200]));
    let encoded = encode_jpeg_base64(&image).unwrap();
    assert!(!encoded.is_empty());

    let bytes = BASE64.decode(encoded).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (32, 16));
  }
}

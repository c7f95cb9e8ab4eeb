//! # Duckie Vision
//!
//! Braitenberg 小车的视觉部分（纯函数，无状态）
//!
//! ## 模块
//!
//! - `connections`: 左右电机权重矩阵、掩码到轮速激活
//! - `preprocessing`: RGB → HSV 颜色掩码
//! - `error`: 错误类型
//!
//! ## 数据流
//!
//! ```text
//! RgbImage ──preprocess──▶ GrayImage (0 / 255) ──MotorMatrices::respond──▶ WheelResponse
//! ```

pub mod connections;
pub mod error;
pub mod preprocessing;

// 重新导出常用类型
pub use connections::{
    MotorMatrices, MotorSide, Shape, WheelResponse, get_motor_left_matrix, get_motor_right_matrix,
    motor_matrix,
};
pub use error::VisionError;
pub use preprocessing::{
    DEFAULT_LOWER_HSV, DEFAULT_UPPER_HSV, HsvRange, MASK_ON, mask_coverage, preprocess,
    preprocess_buffer, preprocess_with, rgb_to_hsv,
};

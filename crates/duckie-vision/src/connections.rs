//! Braitenberg 连接矩阵
//!
//! 把图像（掩码）的每个像素连接到左右电机的权重矩阵。
//! 矩阵在竖直中线 `cols / 2` 处分成两半，取值只有 `+1` / `-1`：
//!
//! ```text
//!            cols/2
//!   左电机:  +1 +1 | -1 -1 -1
//!   右电机:  -1 -1 | +1 +1 +1
//! ```
//!
//! 奇数列时多出的一列归右半边，因此左矩阵有 `cols / 2` 列 `+1`、
//! `cols - cols / 2` 列 `-1`。

use crate::error::VisionError;
use image::GrayImage;
use nalgebra::DMatrix;

/// 矩阵形状 `(rows, cols)`
pub type Shape = (usize, usize);

/// 电机侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MotorSide {
    Left,
    Right,
}

impl MotorSide {
    /// 左半边（`col < cols / 2`）的权重
    fn near_half_weight(self) -> f32 {
        match self {
            MotorSide::Left => 1.0,
            MotorSide::Right => -1.0,
        }
    }
}

/// 构建指定电机侧的权重矩阵
pub fn motor_matrix(side: MotorSide, shape: Shape) -> Result<DMatrix<f32>, VisionError> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return Err(VisionError::InvalidShape { rows, cols });
    }

    let split = cols / 2;
    let near = side.near_half_weight();
    Ok(DMatrix::from_fn(rows, cols, |_, col| if col < split { near } else { -near }))
}

/// 左电机权重矩阵：左半边 `+1`，右半边 `-1`
pub fn get_motor_left_matrix(shape: Shape) -> Result<DMatrix<f32>, VisionError> {
    motor_matrix(MotorSide::Left, shape)
}

/// 右电机权重矩阵：左半边 `-1`，右半边 `+1`
pub fn get_motor_right_matrix(shape: Shape) -> Result<DMatrix<f32>, VisionError> {
    motor_matrix(MotorSide::Right, shape)
}

/// 左右电机的激活值
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelResponse {
    /// 左电机激活
    pub left: f32,

    /// 右电机激活
    pub right: f32,
}

/// 同一形状的左右权重矩阵
#[derive(Debug, Clone, PartialEq)]
pub struct MotorMatrices {
    /// 左电机权重
    pub left: DMatrix<f32>,

    /// 右电机权重
    pub right: DMatrix<f32>,
}

impl MotorMatrices {
    /// 为给定形状构建左右矩阵
    pub fn new(shape: Shape) -> Result<Self, VisionError> {
        Ok(Self {
            left: get_motor_left_matrix(shape)?,
            right: get_motor_right_matrix(shape)?,
        })
    }

    /// 矩阵形状 `(rows, cols)`
    pub fn shape(&self) -> Shape {
        self.left.shape()
    }

    /// 计算掩码对左右电机的激活：`Σ weight * (mask / 255)`
    ///
    /// 掩码高度对应矩阵行数，宽度对应列数。
    pub fn respond(&self, mask: &GrayImage) -> Result<WheelResponse, VisionError> {
        let actual = (mask.height() as usize, mask.width() as usize);
        if actual != self.shape() {
            return Err(VisionError::ShapeMismatch {
                expected: self.shape(),
                actual,
            });
        }

        let mut response = WheelResponse::default();
        for (x, y, pixel) in mask.enumerate_pixels() {
            if pixel[0] == 0 {
                continue;
            }
            let activation = f32::from(pixel[0]) / 255.0;
            let idx = (y as usize, x as usize);
            response.left += self.left[idx] * activation;
            response.right += self.right[idx] * activation;
        }

        tracing::trace!(left = response.left, right = response.right, "wheel response");
        Ok(response)
    }
}

//! 视觉层错误类型

use thiserror::Error;

/// 视觉处理错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisionError {
    /// 矩阵或图像尺寸为零
    #[error("Invalid shape: ({rows}, {cols}), both dimensions must be positive")]
    InvalidShape { rows: usize, cols: usize },

    /// 输入图像不是 3 通道
    #[error("Invalid channel count: expected 3, got {0}")]
    InvalidChannelCount(usize),

    /// 缓冲区长度与尺寸不符
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// 掩码尺寸与权重矩阵不一致
    #[error("Shape mismatch: weights are {expected:?}, mask is {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// HSV 区间下界大于上界
    #[error("Invalid HSV range on channel {channel}: lower {lower} > upper {upper}")]
    InvalidRange { channel: usize, lower: u8, upper: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VisionError::InvalidShape { rows: 0, cols: 4 };
        assert_eq!(
            err.to_string(),
            "Invalid shape: (0, 4), both dimensions must be positive"
        );

        assert_eq!(
            VisionError::InvalidChannelCount(4).to_string(),
            "Invalid channel count: expected 3, got 4"
        );

        let err = VisionError::BufferSizeMismatch {
            expected: 12,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Buffer size mismatch: expected 12 bytes, got 5");

        let err = VisionError::ShapeMismatch {
            expected: (2, 4),
            actual: (4, 2),
        };
        assert_eq!(err.to_string(), "Shape mismatch: weights are (2, 4), mask is (4, 2)");

        let err = VisionError::InvalidRange {
            channel: 1,
            lower: 50,
            upper: 40,
        };
        assert_eq!(err.to_string(), "Invalid HSV range on channel 1: lower 50 > upper 40");
    }
}

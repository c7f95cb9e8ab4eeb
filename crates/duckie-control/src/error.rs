//! 控制层错误类型

use thiserror::Error;

/// 横向控制错误
///
/// 所有错误都直接返回给调用者，内部不做重试或恢复。
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ControlError {
    /// `delta_t == 0`，微分项无法计算
    #[error("Division by zero: delta_t must be strictly positive")]
    DivisionByZero,

    /// 参数不合法（负数或 NaN）
    #[error("Invalid argument {name}: {value}")]
    InvalidArgument {
        /// 参数名
        name: &'static str,
        /// 实际值
        value: f64,
    },

    /// 增益不是有限值
    #[error("Invalid gain {name}: {value} (must be finite)")]
    InvalidGain {
        /// 增益名（kp / ki / kd）
        name: &'static str,
        /// 实际值
        value: f64,
    },
}

impl ControlError {
    /// 是否由时间步长引起
    pub fn is_time_step_error(&self) -> bool {
        matches!(
            self,
            ControlError::DivisionByZero | ControlError::InvalidArgument { name: "delta_t", .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlError::InvalidArgument {
            name: "delta_t",
            value: -0.5,
        };
        assert_eq!(err.to_string(), "Invalid argument delta_t: -0.5");

        let err = ControlError::InvalidGain {
            name: "kp",
            value: f64::INFINITY,
        };
        assert!(err.to_string().contains("kp"));
    }

    #[test]
    fn test_is_time_step_error() {
        assert!(ControlError::DivisionByZero.is_time_step_error());
        assert!(
            ControlError::InvalidArgument {
                name: "delta_t",
                value: f64::NAN
            }
            .is_time_step_error()
        );
        assert!(
            !ControlError::InvalidGain {
                name: "ki",
                value: f64::NAN
            }
            .is_time_step_error()
        );
    }
}

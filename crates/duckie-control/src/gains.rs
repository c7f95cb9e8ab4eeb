//! PID 增益与积分递推方式
//!
//! 增益是只读配置，由调用者注入 [`LateralPid`](crate::LateralPid)，不使用全局变量。

use crate::error::ControlError;

/// 默认比例增益
pub const DEFAULT_KP: f64 = 5.0;

/// 默认积分增益
pub const DEFAULT_KI: f64 = 5.0;

/// 默认微分增益
pub const DEFAULT_KD: f64 = 1.0;

/// PID 增益
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PidGains {
    /// 比例增益 (Kp)
    pub proportional: f64,

    /// 积分增益 (Ki)
    pub integral: f64,

    /// 微分增益 (Kd)
    pub derivative: f64,
}

impl PidGains {
    /// 创建增益
    pub const fn new(proportional: f64, integral: f64, derivative: f64) -> Self {
        Self {
            proportional,
            integral,
            derivative,
        }
    }

    /// 替换全部增益
    ///
    /// ```rust
    /// use duckie_control::PidGains;
    ///
    /// let gains = PidGains::default().with_gains(2.0, 0.0, 0.5);
    /// assert_eq!(gains.proportional, 2.0);
    /// ```
    pub fn with_gains(mut self, kp: f64, ki: f64, kd: f64) -> Self {
        self.proportional = kp;
        self.integral = ki;
        self.derivative = kd;
        self
    }

    /// 检查所有增益都是有限值
    pub fn validate(&self) -> Result<(), ControlError> {
        let fields = [
            ("kp", self.proportional),
            ("ki", self.integral),
            ("kd", self.derivative),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ControlError::InvalidGain { name, value });
            }
        }

        Ok(())
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(DEFAULT_KP, DEFAULT_KI, DEFAULT_KD)
    }
}

/// 积分项的递推方式
///
/// 课程原始作业把 `previous_error` 当作积分累积的起点：
///
/// ```text
/// integral = previous_error + error * dt
/// ```
///
/// 这与教科书 PID（`integral = previous_integral + error * dt`）不同，很可能是原作者的笔误。
/// 默认保持原始行为；改用标准递推必须显式选择 [`IntegralRecurrence::Accumulated`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IntegralRecurrence {
    /// `integral = previous_error + error * dt`（原始作业行为）
    #[default]
    PreviousError,

    /// `integral = previous_integral + error * dt`
    Accumulated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gains() {
        let gains = PidGains::default();
        assert_eq!(gains.proportional, 5.0);
        assert_eq!(gains.integral, 5.0);
        assert_eq!(gains.derivative, 1.0);
    }

    #[test]
    fn test_with_gains() {
        let gains = PidGains::default().with_gains(1.0, 0.1, 0.01);
        assert_eq!(gains, PidGains::new(1.0, 0.1, 0.01));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(PidGains::default().validate().is_ok());

        let err = PidGains::new(f64::NAN, 0.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, ControlError::InvalidGain { name: "kp", .. }));

        let err = PidGains::new(1.0, 1.0, f64::NEG_INFINITY).validate().unwrap_err();
        assert!(matches!(err, ControlError::InvalidGain { name: "kd", .. }));
    }

    #[test]
    fn test_default_recurrence_is_source_behavior() {
        assert_eq!(IntegralRecurrence::default(), IntegralRecurrence::PreviousError);
    }
}

//! Lateral PID - 横向偏移 PID 控制（单步）
//!
//! 根据目标横向偏移和当前估计偏移，计算角速度指令 `omega`。
//! 前向速度 `v0` 原样透传。
//!
//! # 算法
//!
//! ```text
//! e      = y_ref - y_hat
//! e_int  = prev_e + e * dt
//! de     = (e - e_int) / dt
//! omega  = Kp * e + Ki * e_int + Kd * de
//! ```
//!
//! 控制器本身无状态：上一步的误差和积分保存在调用者持有的 [`ControlState`] 中，
//! 每一步传入并返回新的状态。
//!
//! # 时间步长
//!
//! - `dt == 0`：返回 [`ControlError::DivisionByZero`]
//! - `dt < 0` 或 NaN：返回 [`ControlError::InvalidArgument`]
//! - 任意 `dt > 0`：直接计算，不做钳位。`dt` 趋近 0 时微分项趋向 ±∞，
//!   结果可能是 `inf` / `NaN`，由调用者处理
//!
//! # 示例
//!
//! ```rust
//! use duckie_control::{ControlState, LateralPid, PidGains};
//!
//! let pid = LateralPid::new(PidGains::default());
//! let mut state = ControlState::default();
//!
//! let cmd = pid.step(1.0, 2.0, 0.0, state, 1.0).unwrap();
//! assert_eq!(cmd.into_tuple(), (1.0, 20.0, 2.0, 2.0));
//!
//! state = cmd.next_state();
//! assert_eq!(state.previous_error, 2.0);
//! ```

use crate::error::ControlError;
use crate::gains::{IntegralRecurrence, PidGains};

/// 上一步的控制状态，由外部控制循环持有
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlState {
    /// 上一步的跟踪误差
    pub previous_error: f64,

    /// 上一步的积分误差
    pub previous_integral: f64,
}

impl ControlState {
    /// 创建控制状态
    pub const fn new(previous_error: f64, previous_integral: f64) -> Self {
        Self {
            previous_error,
            previous_integral,
        }
    }
}

/// 单步控制输出
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LateralCommand {
    /// 前向线速度（透传）
    pub v0: f64,

    /// 角速度指令
    pub omega: f64,

    /// 当前跟踪误差
    pub error: f64,

    /// 当前积分误差
    pub integral_error: f64,
}

impl LateralCommand {
    /// `(v0, omega, error, integral_error)`
    pub fn into_tuple(self) -> (f64, f64, f64, f64) {
        (self.v0, self.omega, self.error, self.integral_error)
    }

    /// 传给下一步的状态
    pub fn next_state(&self) -> ControlState {
        ControlState::new(self.error, self.integral_error)
    }
}

/// 横向 PID 控制器
///
/// 只保存只读配置（增益、积分递推方式），可以在多个线程间共享。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LateralPid {
    gains: PidGains,
    recurrence: IntegralRecurrence,
}

impl LateralPid {
    /// 使用给定增益创建控制器，积分递推保持原始行为
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            recurrence: IntegralRecurrence::default(),
        }
    }

    /// 设置积分递推方式
    pub fn with_recurrence(mut self, recurrence: IntegralRecurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// 获取当前增益
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// 获取积分递推方式
    pub fn recurrence(&self) -> IntegralRecurrence {
        self.recurrence
    }

    /// 计算一步控制
    ///
    /// # 参数
    ///
    /// - `v0`: 前向线速度，原样返回
    /// - `target_offset`: 目标横向偏移
    /// - `estimated_offset`: 当前估计的横向偏移
    /// - `state`: 上一步的误差和积分
    /// - `delta_t`: 距上次调用的时间（秒），必须 > 0
    pub fn step(
        &self,
        v0: f64,
        target_offset: f64,
        estimated_offset: f64,
        state: ControlState,
        delta_t: f64,
    ) -> Result<LateralCommand, ControlError> {
        if let Err(err) = check_delta_t(delta_t) {
            tracing::warn!("Lateral PID rejected delta_t {}: {}", delta_t, err);
            return Err(err);
        }

        // 1. 误差
        let error = target_offset - estimated_offset;

        // 2. 积分项
        let base = match self.recurrence {
            IntegralRecurrence::PreviousError => state.previous_error,
            IntegralRecurrence::Accumulated => state.previous_integral,
        };
        let integral_error = base + error * delta_t;

        // 3. 微分项（不钳位）
        let derivative = Self::derivative_term(error, integral_error, delta_t);

        // 4. 输出
        let omega = self.gains.proportional * error
            + self.gains.integral * integral_error
            + self.gains.derivative * derivative;

        tracing::trace!(
            error,
            integral_error,
            derivative,
            omega,
            "lateral pid step"
        );

        Ok(LateralCommand {
            v0,
            omega,
            error,
            integral_error,
        })
    }

    /// 微分项 `(error - integral_error) / delta_t`
    ///
    /// 不检查 `delta_t`，`delta_t == 0` 时得到 `inf` 或 `NaN`。
    #[inline]
    pub fn derivative_term(error: f64, integral_error: f64, delta_t: f64) -> f64 {
        (error - integral_error) / delta_t
    }
}

fn check_delta_t(delta_t: f64) -> Result<(), ControlError> {
    if delta_t.is_nan() || delta_t < 0.0 {
        return Err(ControlError::InvalidArgument {
            name: "delta_t",
            value: delta_t,
        });
    }
    if delta_t == 0.0 {
        return Err(ControlError::DivisionByZero);
    }
    Ok(())
}

/// 使用默认增益 (5, 5, 1) 计算一步横向控制
///
/// 返回 `(v0, omega, error, integral_error)`，后两项作为下一次调用的
/// `previous_error` / `previous_integral`。
///
/// 默认递推下 `previous_integral` 不参与计算。
pub fn lateral_pid_step(
    v0: f64,
    target_offset: f64,
    estimated_offset: f64,
    previous_error: f64,
    previous_integral: f64,
    delta_t: f64,
) -> Result<(f64, f64, f64, f64), ControlError> {
    LateralPid::default()
        .step(
            v0,
            target_offset,
            estimated_offset,
            ControlState::new(previous_error, previous_integral),
            delta_t,
        )
        .map(LateralCommand::into_tuple)
}

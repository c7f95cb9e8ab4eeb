//! # Duckie Control
//!
//! Duckiebot 横向控制（无硬件依赖）
//!
//! ## 模块
//!
//! - `lateral`: 单步横向 PID
//! - `gains`: PID 增益与积分递推方式
//! - `error`: 错误类型
//!
//! 控制循环调度、传感器/执行器 I/O 不在本 crate 范围内，
//! 调用者负责在每一步之间传递 [`ControlState`]。

pub mod error;
pub mod gains;
pub mod lateral;

// 重新导出常用类型
pub use error::ControlError;
pub use gains::{DEFAULT_KD, DEFAULT_KI, DEFAULT_KP, IntegralRecurrence, PidGains};
pub use lateral::{ControlState, LateralCommand, LateralPid, lateral_pid_step};

//! 单步横向 PID 命令

use crate::config::DuckieConfig;
use anyhow::Result;
use clap::Args;
use duckie_control::{ControlState, LateralCommand};
use serde_json::{Value, json};

/// PID 命令参数
#[derive(Args, Debug)]
pub struct PidCommand {
    /// 前向线速度（透传）
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub v0: f64,

    /// 目标横向偏移
    #[arg(long, allow_negative_numbers = true)]
    pub target: f64,

    /// 当前估计的横向偏移
    #[arg(long, allow_negative_numbers = true)]
    pub estimate: f64,

    /// 上一步误差
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub prev_error: f64,

    /// 上一步积分误差
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub prev_integral: f64,

    /// 时间间隔（秒），必须 > 0
    #[arg(long, allow_negative_numbers = true)]
    pub dt: f64,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

impl PidCommand {
    pub fn execute(&self, config: &DuckieConfig) -> Result<()> {
        let pid = config.lateral_pid();
        let state = ControlState::new(self.prev_error, self.prev_integral);
        let cmd = pid.step(self.v0, self.target, self.estimate, state, self.dt)?;

        if self.json {
            println!("{}", serde_json::to_string(&command_json(&cmd))?);
        } else {
            println!(
                "v0={} omega={} error={} integral_error={}",
                cmd.v0, cmd.omega, cmd.error, cmd.integral_error
            );
        }
        Ok(())
    }
}

/// JSON 无法表示 ±inf / NaN，这些值输出为字符串 `"inf"` / `"-inf"` / `"NaN"`
fn command_json(cmd: &LateralCommand) -> Value {
    json!({
        "v0": json_number(cmd.v0),
        "omega": json_number(cmd.omega),
        "error": json_number(cmd.error),
        "integral_error": json_number(cmd.integral_error),
    })
}

fn json_number(x: f64) -> Value {
    if x.is_nan() {
        Value::from("NaN")
    } else if x == f64::INFINITY {
        Value::from("inf")
    } else if x == f64::NEG_INFINITY {
        Value::from("-inf")
    } else {
        Value::from(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_number_non_finite() {
        assert_eq!(json_number(f64::INFINITY), Value::from("inf"));
        assert_eq!(json_number(f64::NEG_INFINITY), Value::from("-inf"));
        assert_eq!(json_number(f64::NAN), Value::from("NaN"));
        assert_eq!(json_number(2.5), Value::from(2.5));
    }

    #[test]
    fn test_command_json_keeps_field_names() {
        let cmd = LateralCommand {
            v0: 1.0,
            omega: f64::INFINITY,
            error: 2.0,
            integral_error: 2.0,
        };
        let value = command_json(&cmd);
        assert_eq!(value["v0"], 1.0);
        assert_eq!(value["omega"], "inf");
        assert_eq!(value["error"], 2.0);
        assert_eq!(value["integral_error"], 2.0);
    }
}

//! 电机权重矩阵命令

use anyhow::Result;
use clap::{Args, ValueEnum};
use duckie_vision::{MotorSide, motor_matrix};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for MotorSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Left => MotorSide::Left,
            SideArg::Right => MotorSide::Right,
        }
    }
}

/// 矩阵命令参数
#[derive(Args, Debug)]
pub struct MatrixCommand {
    /// 行数
    #[arg(short, long)]
    pub rows: usize,

    /// 列数
    #[arg(short, long)]
    pub cols: usize,

    /// 电机侧
    #[arg(short, long, value_enum, default_value = "left")]
    pub side: SideArg,
}

impl MatrixCommand {
    pub fn execute(&self) -> Result<()> {
        let matrix = motor_matrix(self.side.into(), (self.rows, self.cols))?;

        for row in matrix.row_iter() {
            let line: Vec<String> = row.iter().map(|w| format!("{:>2}", w)).collect();
            println!("{}", line.join(" "));
        }
        Ok(())
    }
}

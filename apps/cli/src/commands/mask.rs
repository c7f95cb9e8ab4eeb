//! 颜色掩码命令
//!
//! 读取 RGB 图像，写出二值掩码 PNG，并打印 Braitenberg 轮速激活。

use crate::config::DuckieConfig;
use anyhow::{Context, Result};
use clap::Args;
use duckie_vision::{MotorMatrices, mask_coverage, preprocess_with};
use std::path::PathBuf;

/// 掩码命令参数
#[derive(Args, Debug)]
pub struct MaskCommand {
    /// 输入图像
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出掩码（PNG）
    #[arg(short, long)]
    pub output: PathBuf,
}

impl MaskCommand {
    pub fn execute(&self, config: &DuckieConfig) -> Result<()> {
        let image = image::open(&self.input)
            .with_context(|| format!("读取图像失败: {}", self.input.display()))?
            .to_rgb8();

        let mask = preprocess_with(&image, &config.hsv);
        mask.save(&self.output)
            .with_context(|| format!("写入掩码失败: {}", self.output.display()))?;

        let (width, height) = mask.dimensions();
        let matrices = MotorMatrices::new((height as usize, width as usize))?;
        let response = matrices.respond(&mask)?;

        tracing::info!("Wrote mask {}x{} to {}", width, height, self.output.display());
        println!("coverage={:.4}", mask_coverage(&mask));
        println!("left={} right={}", response.left, response.right);
        Ok(())
    }
}

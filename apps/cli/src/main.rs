//! # Duckie CLI
//!
//! Duckiebot 课程作业的命令行工具。
//!
//! ```bash
//! # 单步横向 PID
//! duckie-cli pid --v0 1.0 --target 2.0 --estimate 0.0 --dt 1.0
//!
//! # 打印左电机权重矩阵
//! duckie-cli matrix --rows 2 --cols 4 --side left
//!
//! # 生成颜色掩码
//! duckie-cli mask --input frame.png --output mask.png
//! ```
//!
//! 全局 `--config` 指定 TOML 配置文件，见 [`config::DuckieConfig`]。

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{ConfigCommand, MaskCommand, MatrixCommand, PidCommand};
use config::DuckieConfig;

/// Duckie CLI - Duckiebot 控制与视觉工具
#[derive(Parser, Debug)]
#[command(name = "duckie-cli")]
#[command(about = "Command-line harness for the Duckiebot PID and Braitenberg exercises", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件路径（TOML）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 计算一步横向 PID
    Pid {
        #[command(flatten)]
        args: PidCommand,
    },

    /// 打印电机权重矩阵
    Matrix {
        #[command(flatten)]
        args: MatrixCommand,
    },

    /// 生成 HSV 颜色掩码
    Mask {
        #[command(flatten)]
        args: MaskCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，stdout 只留结果）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duckie_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = DuckieConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Pid { args } => args.execute(&config),
        Commands::Matrix { args } => args.execute(),
        Commands::Mask { args } => args.execute(&config),
        Commands::Config(cmd) => cmd.execute(&config),
    }
}

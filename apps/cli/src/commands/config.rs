//! 配置查看命令

use crate::config::{DuckieConfig, default_config_path};
use anyhow::Result;
use clap::Subcommand;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 打印生效的配置（TOML）
    Show,

    /// 打印默认配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(&self, config: &DuckieConfig) -> Result<()> {
        match self {
            ConfigCommand::Show => print!("{}", config.to_toml_string()?),

            ConfigCommand::Path => match default_config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("(无法确定配置目录)"),
            },
        }
        Ok(())
    }
}

//! CLI 配置
//!
//! 配置文件路径：
//! - Linux: `~/.config/duckie/config.toml`
//! - macOS: `~/Library/Application Support/duckie/config.toml`
//! - Windows: `%APPDATA%\duckie\config.toml`
//!
//! 所有字段都可省略，缺省值与课程作业中的常量一致。配置只读，从不回写。
//!
//! ```toml
//! recurrence = "previous_error"
//!
//! [gains]
//! proportional = 5.0
//! integral = 5.0
//! derivative = 1.0
//!
//! [hsv]
//! lower = [0, 0, 69]
//! upper = [28, 233, 255]
//! ```

use anyhow::{Context, Result};
use duckie_control::{IntegralRecurrence, LateralPid, PidGains};
use duckie_vision::HsvRange;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("duckie");
    path.push("config.toml");
    Some(path)
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckieConfig {
    /// 积分递推方式（需在所有表之前）
    pub recurrence: IntegralRecurrence,

    /// PID 增益
    pub gains: PidGains,

    /// 颜色掩码区间
    pub hsv: HsvRange,
}

impl DuckieConfig {
    /// 加载配置
    ///
    /// 显式指定的路径必须存在；默认路径不存在时返回默认配置。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                },
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验增益与 HSV 区间
    pub fn validate(&self) -> Result<()> {
        self.gains.validate().context("PID 增益无效")?;
        self.hsv.validate().context("HSV 区间无效")?;
        Ok(())
    }

    /// 按配置构建横向 PID
    pub fn lateral_pid(&self) -> LateralPid {
        LateralPid::new(self.gains).with_recurrence(self.recurrence)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

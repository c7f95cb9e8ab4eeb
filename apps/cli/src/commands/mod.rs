//! 命令定义和实现

pub mod config;
pub mod mask;
pub mod matrix;
pub mod pid;

pub use config::ConfigCommand;
pub use mask::MaskCommand;
pub use matrix::MatrixCommand;
pub use pid::PidCommand;

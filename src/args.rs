use crate::config::AppConfig;
use crate::errors::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wirebox - 服务容器启动与容器引擎连通性检查
#[derive(Parser, Debug)]
#[command(name = "wirebox", version)]
#[command(about = "Wire a lazy service container and check the container engine")]
pub struct Args {
    /// 子命令（默认 probe）
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 配置文件路径（TOML）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 容器引擎地址，例如 unix:///var/run/docker.sock 或 tcp://host:2375
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// 日志级别
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// 日志格式：pretty / json / compact
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 解析引擎客户端并发送 ping
    Probe,
    /// 列出已注册的服务名称（不构造任何服务）
    Services,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Probe)
    }

    /// 命令行参数覆盖文件和环境变量中的配置
    pub fn apply_to(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(host) = &self.host {
            config.engine.host = Some(host.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.parse()?;
        }
        config.validate()
    }
}

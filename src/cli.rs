//! CLI 参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hostsguard - hosts 黑名单文件校验与清理工具
#[derive(Parser)]
#[command(
    name = "hostsguard",
    version,
    about = "校验并清理 hosts 黑名单文件",
    long_about = "逐行校验 hosts 文件，删除被篡改或不合规的行，保留下划线子域名，\n并在确认后生成规范化的安装计划"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 配置文件路径（默认 ~/.hostsguard/config.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 校验 hosts 文件并报告问题行
    Check {
        /// hosts 文件路径
        file: PathBuf,
        /// 输出格式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 输出清理后的 hosts 文件
    Clean {
        /// hosts 文件路径
        file: PathBuf,
    },

    /// 生成安装计划（不写入任何文件）
    Plan {
        /// hosts 文件路径
        file: PathBuf,
        /// 确认安装
        #[arg(short, long)]
        yes: bool,
    },

    /// 显示当前配置和已安装版本
    Status,
}

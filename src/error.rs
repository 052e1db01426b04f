//! 错误处理模块 (修复原则：明确抛出异常)

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsError {
    /// 由宿主程序提供的网络 Fetcher 使用
    #[error("下载失败 {url}: {message}")]
    Transport { url: String, message: String },

    #[error("文件IO错误 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("文件不存在: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("权限不足: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("无法读取 hosts 文件日期: {0}")]
    DateUnparsable(String),

    #[error("未找到域名数量行 (# Number of unique domains)")]
    HeaderNotFound,

    #[error("缺少必需的回环条目: {0}")]
    EntryNotFound(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("配置文件解析失败 {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostsError {
    /// 按 io::ErrorKind 归类文件错误，保留路径
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => HostsError::FileNotFound(path),
            std::io::ErrorKind::PermissionDenied => HostsError::PermissionDenied(path),
            _ => HostsError::Io { path, source: err },
        }
    }

    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息，安静模式
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                HostsError::FileNotFound(path) => eprintln!("文件不存在: {}", path.display()),
                HostsError::PermissionDenied(path) => {
                    eprintln!("权限被拒绝: {}", path.display())
                }
                HostsError::HeaderNotFound | HostsError::EntryNotFound(_) => {
                    eprintln!("hosts 文件不合规，已中止: {}", self)
                }
                _ => eprintln!("错误: {}", self),
            }
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, HostsError>;

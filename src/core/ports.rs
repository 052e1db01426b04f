//! 外部协作者接口（输入/输出端口）
//!
//! 下载、写盘、提权复制、重启网络服务都由宿主程序实现，
//! 本 crate 只负责算出交给它们的数据。

use crate::error::Result;
use crate::types::Document;
use crate::utils::paths;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// 文档来源
pub trait Fetcher {
    /// 来源描述（URL 或路径），用于日志和报错
    fn describe(&self) -> String;

    /// 读取文档
    ///
    /// 网络错误返回 `Transport`，文件错误返回 `Io`/`FileNotFound`/`PermissionDenied`。
    fn fetch(&self) -> Result<Document>;
}

/// 从本地文件读取
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Document> {
        let content = paths::read_file(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// 安装请求：最终文档及其落盘位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallRequest {
    /// 换行拼接的完整内容（末尾带换行）
    #[serde(skip)]
    pub contents: String,
    pub snapshot_path: PathBuf,
    pub latest_path: PathBuf,
    pub system_hosts: PathBuf,
    pub sha256: String,
    pub lines: usize,
    pub bytes: usize,
}

/// 安装器：写快照、写 latest、覆盖系统 hosts、刷新 DNS 缓存
pub trait Installer {
    fn install(&self, request: &InstallRequest) -> Result<()>;
}

/// 只打印安装计划，不写任何文件
pub struct DryRunInstaller<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> DryRunInstaller<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> Installer for DryRunInstaller<W> {
    fn install(&self, request: &InstallRequest) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let io_err = |e| crate::error::HostsError::from_io("<stdout>", e);

        writeln!(out, "# Save hosts to {}", request.snapshot_path.display()).map_err(io_err)?;
        writeln!(out, "# Save hosts to {}", request.latest_path.display()).map_err(io_err)?;
        writeln!(
            out,
            "# Update {} from {}",
            request.system_hosts.display(),
            request.latest_path.display()
        )
        .map_err(io_err)?;
        writeln!(out, "# Flush DNS cache").map_err(io_err)?;
        writeln!(
            out,
            "sha256: {}  ({} lines, {} bytes)",
            request.sha256, request.lines, request.bytes
        )
        .map_err(io_err)?;

        tracing::info!(snapshot = %request.snapshot_path.display(), "演练模式：未写入任何文件");
        Ok(())
    }
}

//! 测试工具模块
//!
//! 提供统一的测试文档、内存来源和记录型安装器

use crate::core::ports::{Fetcher, InstallRequest, Installer};
use crate::error::{HostsError, Result};
use crate::types::{Document, LineRecord};
use std::cell::RefCell;

/// &str 切片转文档
pub fn lines(items: &[&str]) -> Document {
    items.iter().map(|s| s.to_string()).collect()
}

/// 完整性校验样本：前 11 行有问题，后 6 行合法
pub fn integrity_fixture() -> Document {
    lines(&[
        " This is # a bad line -0",
        "111.222.333.444 scammers-1.com",
        "\n0.0.222.0 scammers-2.com",
        "# \n111.222.333.444 scammers-3.com",
        "# comment \r\x0c0.444.0.0 scammers-4.com",
        "# \n111.222.333.444 sub_domain.scammers-5.com",
        "0.0.0.0 \n111.222.333.444 scammers-6.com",
        "0.0.0.0 bad-7.007",
        "0.0.0.0 bad-8",
        "0.0.0.0 bad-9.i",
        "0.0.0.0 sub_domain.bad-10.com",
        "127.0.0.1 localhost",
        "127.0.0.1 localhost.localdomain",
        "127.0.0.1 local",
        "::1 localhost",
        "0.0.0.0 0.0.0.0.valid-try-11.net",
        "0.0.0.0 good-12.012com",
    ])
}

/// integrity_fixture 应被标记的行
pub fn integrity_fixture_flags() -> Vec<LineRecord> {
    integrity_fixture()
        .into_iter()
        .take(11)
        .enumerate()
        .map(|(i, text)| LineRecord::new(i, text))
        .collect()
}

/// integrity_fixture 清理后的结果（下划线子域名行被保留）
pub fn integrity_fixture_cleaned() -> Document {
    lines(&[
        "0.0.0.0 sub_domain.bad-10.com",
        "127.0.0.1 localhost",
        "127.0.0.1 localhost.localdomain",
        "127.0.0.1 local",
        "::1 localhost",
        "0.0.0.0 0.0.0.0.valid-try-11.net",
        "0.0.0.0 good-12.012com",
    ])
}

/// 类似上游发布的 hosts 文件：头部声明 5，实际 6，清理后 4
pub fn published_hosts() -> Document {
    lines(&[
        "# Title: StevenBlack/hosts",
        "# Date: 14 October 2026 14:23:11 (UTC)",
        "# Number of unique domains: 5",
        "#",
        "127.0.0.1 localhost",
        "127.0.0.1 localhost.localdomain",
        "127.0.0.1 local",
        "255.255.255.255 broadcasthost",
        "::1 localhost",
        "::1 ip6-localhost",
        "fe80::1%lo0 localhost",
        "0.0.0.0 0.0.0.0",
        "# blocklist",
        "0.0.0.0 ads.example.com",
        "0.0.0.0 tracker.example.net # telemetry",
        "0.0.0.0 malware.example.io",
        "0.0.0.0 sub_domain.cdn.example.org",
        "0.0.0.0 bad-8",
        "0.0.0.0 phish.example.com\r",
    ])
}

/// 内存来源
pub struct StaticFetcher {
    document: Option<Document>,
    url: String,
}

impl StaticFetcher {
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
            url: "memory".to_string(),
        }
    }

    /// 模拟下载失败
    pub fn failing(url: &str) -> Self {
        Self {
            document: None,
            url: url.to_string(),
        }
    }
}

impl Fetcher for StaticFetcher {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Document> {
        self.document.clone().ok_or_else(|| HostsError::Transport {
            url: self.url.clone(),
            message: "connection refused".to_string(),
        })
    }
}

/// 记录所有安装请求
#[derive(Default)]
pub struct RecordingInstaller {
    requests: RefCell<Vec<InstallRequest>>,
}

impl RecordingInstaller {
    pub fn requests(&self) -> Vec<InstallRequest> {
        self.requests.borrow().clone()
    }
}

impl Installer for RecordingInstaller {
    fn install(&self, request: &InstallRequest) -> Result<()> {
        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
}

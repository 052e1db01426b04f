//! 更新流程：读取 → 校验 → 清理 → (确认后) 规范化并交给安装器
//!
//! 任何致命错误都在调用安装器之前返回，半成品文档永远不会被安装。

use crate::config::Settings;
use crate::core::classifier::find_invalid_lines;
use crate::core::counter::{count_canonical, read_declared_count, write_declared_count};
use crate::core::grammar::Grammar;
use crate::core::normalizer::restore_loopback;
use crate::core::ports::{Fetcher, InstallRequest, Installer};
use crate::core::repair::repair_detailed;
use crate::error::Result;
use crate::types::{Document, DomainCount, LineRecord, RepairOutcome};
use crate::utils::date::{HostsDate, parse_header_date};
use crate::utils::digest::sha256_hex;
use crate::utils::paths;
use serde::Serialize;

/// 一次检查的结果
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub source: String,
    pub date: HostsDate,
    /// 清理前头部声明的数量
    pub declared: DomainCount,
    pub calculated_before: usize,
    pub calculated_after: usize,
    pub flagged: Vec<LineRecord>,
    pub repair: RepairOutcome,
    pub lines: usize,
    pub bytes: usize,
    /// 清理后的文档
    #[serde(skip)]
    pub document: Document,
}

impl Inspection {
    /// 头部声明与实际统计是否一致
    pub fn count_matches(&self) -> bool {
        self.declared.declared == Some(self.calculated_before)
    }
}

/// 已读取、尚未清理的文档
#[derive(Debug, Clone)]
pub struct Fetched {
    pub source: String,
    pub date: HostsDate,
    pub document: Document,
}

/// 与已安装版本比较的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// 没有 latest 文件
    NoBaseline,
    /// 来源比已安装版本新
    Stale { installed: HostsDate },
    /// 来源不比已安装版本新
    Current { installed: HostsDate },
}

/// 安装结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Skipped,
    Installed(InstallRequest),
}

pub struct UpdateSession<'a> {
    grammar: &'a Grammar,
    settings: &'a Settings,
}

impl<'a> UpdateSession<'a> {
    pub fn new(grammar: &'a Grammar, settings: &'a Settings) -> Self {
        Self { grammar, settings }
    }

    /// 读取文档并解析头部日期
    ///
    /// 只做读取，不做统计和清理，用于在清理之前判断是否需要更新。
    pub fn fetch(&self, fetcher: &dyn Fetcher) -> Result<Fetched> {
        let source = fetcher.describe();
        let document = fetcher.fetch()?;
        tracing::info!(source = %source, lines = document.len(), "已读取 hosts 文件");

        let date = parse_header_date(self.grammar, &document)?;
        Ok(Fetched {
            source,
            date,
            document,
        })
    }

    /// 读取并清理文档
    ///
    /// # Errors
    ///
    /// 读取失败、缺少日期、有行被标记但没有数量头部时返回错误。
    pub fn inspect(&self, fetcher: &dyn Fetcher) -> Result<Inspection> {
        let fetched = self.fetch(fetcher)?;
        self.inspect_fetched(fetched)
    }

    /// 清理已读取的文档
    ///
    /// 有行被标记时重新统计并改写数量头部，即使所有标记行都被保留。
    pub fn inspect_fetched(&self, fetched: Fetched) -> Result<Inspection> {
        let Fetched {
            source,
            date,
            mut document,
        } = fetched;

        let lines = document.len();
        let bytes = joined_len(&document);
        let calculated_before = count_canonical(self.grammar, &document);
        let declared = read_declared_count(self.grammar, &document);

        let mut pending = find_invalid_lines(self.grammar, &document);
        let flagged = pending.clone();
        let repair = repair_detailed(self.grammar, &mut document, &mut pending);

        let calculated_after = if flagged.is_empty() {
            calculated_before
        } else {
            let count = count_canonical(self.grammar, &document);
            write_declared_count(self.grammar, &mut document, count)?;
            count
        };

        Ok(Inspection {
            source,
            date,
            declared,
            calculated_before,
            calculated_after,
            flagged,
            repair,
            lines,
            bytes,
            document,
        })
    }

    /// 与 latest 文件的日期比较
    ///
    /// latest 文件存在但无法读取或没有日期时返回错误。
    pub fn freshness(&self, date: &HostsDate) -> Result<Freshness> {
        let latest = self.settings.latest_path()?;
        if !paths::file_exists(&latest) {
            return Ok(Freshness::NoBaseline);
        }
        let baseline = crate::core::ports::FileFetcher::new(latest);
        self.freshness_against(date, &baseline)
    }

    pub fn freshness_against(&self, date: &HostsDate, baseline: &dyn Fetcher) -> Result<Freshness> {
        let installed = parse_header_date(self.grammar, &baseline.fetch()?)?;
        let freshness = if date.date <= installed.date {
            Freshness::Current { installed }
        } else {
            Freshness::Stale { installed }
        };
        tracing::info!(source = %date.stamp(), ?freshness, "比较已安装版本");
        Ok(freshness)
    }

    /// 确认后规范化回环条目并交给安装器
    ///
    /// 未确认时不调用安装器。回环条目缺失时直接返回错误，同样不调用安装器。
    pub fn install(
        &self,
        mut inspection: Inspection,
        confirmed: bool,
        installer: &dyn Installer,
    ) -> Result<InstallOutcome> {
        if !confirmed {
            tracing::info!("未确认，跳过安装");
            return Ok(InstallOutcome::Skipped);
        }

        restore_loopback(&mut inspection.document)?;
        let request = self.build_request(&inspection)?;
        installer.install(&request)?;
        tracing::info!(sha256 = %request.sha256, "已交给安装器");
        Ok(InstallOutcome::Installed(request))
    }

    fn build_request(&self, inspection: &Inspection) -> Result<InstallRequest> {
        let contents = serialize(&inspection.document);
        Ok(InstallRequest {
            sha256: sha256_hex(&contents),
            lines: inspection.document.len(),
            bytes: contents.len(),
            snapshot_path: self.settings.snapshot_path(&inspection.date.stamp())?,
            latest_path: self.settings.latest_path()?,
            system_hosts: self.settings.system_hosts_path()?,
            contents,
        })
    }
}

/// 换行拼接，末尾带换行
pub fn serialize(document: &[String]) -> String {
    let mut out = document.join("\n");
    out.push('\n');
    out
}

fn joined_len(document: &[String]) -> usize {
    document.iter().map(|l| l.len() + 1).sum()
}

//! hostsguard - hosts 黑名单文件校验与清理
//!
//! 核心引擎在 `core`，其余是围绕它的配置、路径与日期工具

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// 重新导出常用类型
pub use error::{HostsError, Result};
pub use types::{Config, Document, DomainCount, LineRecord, OutputFormat, RepairOutcome};

//! 恢复发行版原始 hosts 的回环条目
//!
//! 上游文件中的 localhost 是单别名形式，安装前合并为多别名行。

use crate::error::{HostsError, Result};

pub const IPV4_LOCALHOST: &str = "127.0.0.1 localhost";
pub const IPV4_LOCALDOMAIN: &str = "127.0.0.1 localhost.localdomain";
pub const IPV6_LOCALHOST: &str = "::1 localhost";

pub const IPV4_LOOPBACK: &str =
    "127.0.0.1 localhost localhost.localdomain localhost4 localhost4.localdomain4";
pub const IPV6_LOOPBACK: &str =
    "::1 localhost localhost.localdomain localhost6 localhost6.localdomain6";

/// 改写回环条目
///
/// 三条源行必须都在，否则文档保持原样并返回 `EntryNotFound`。
/// 改写后源行不复存在，所以对同一文档只能调用一次。
pub fn restore_loopback(document: &mut Vec<String>) -> Result<()> {
    let v4 = position(document, IPV4_LOCALHOST)?;
    let v6 = position(document, IPV6_LOCALHOST)?;
    let localdomain = position(document, IPV4_LOCALDOMAIN)?;

    document[v4] = IPV4_LOOPBACK.to_string();
    document[v6] = IPV6_LOOPBACK.to_string();
    document.remove(localdomain);

    tracing::debug!("已恢复回环条目");
    Ok(())
}

fn position(document: &[String], line: &str) -> Result<usize> {
    document
        .iter()
        .position(|l| l == line)
        .ok_or_else(|| HostsError::EntryNotFound(line.to_string()))
}

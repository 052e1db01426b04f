//! 域名数量统计与头部行读写

use crate::core::grammar::{COUNT_HEADER_PREFIX, Grammar};
use crate::error::{HostsError, Result};
use crate::types::DomainCount;

/// 统计黑名单重定向行数（不含 `0.0.0.0 0.0.0.0`）
pub fn count_canonical<S: AsRef<str>>(grammar: &Grammar, document: &[S]) -> usize {
    document
        .iter()
        .filter(|line| grammar.is_counted_redirect(line.as_ref()))
        .count()
}

/// 读取头部声明的域名数量
///
/// 没有头部行不算错误，返回的两个字段都为 None。
pub fn read_declared_count<S: AsRef<str>>(grammar: &Grammar, document: &[S]) -> DomainCount {
    let Some(line) = document
        .iter()
        .map(|line| line.as_ref())
        .find(|line| grammar.is_count_header(line))
    else {
        return DomainCount::default();
    };

    let declared = grammar
        .count_header_digits(line)
        .and_then(|digits| digits.replace(',', "").parse().ok());

    DomainCount {
        declared,
        header: Some(line.to_string()),
    }
}

/// 改写头部行的数量字段
///
/// # Errors
///
/// 文档中没有头部行时返回 `HeaderNotFound`。
pub fn write_declared_count(grammar: &Grammar, document: &mut [String], count: usize) -> Result<()> {
    let line = document
        .iter_mut()
        .find(|line| grammar.is_count_header(line))
        .ok_or(HostsError::HeaderNotFound)?;

    *line = format!("{COUNT_HEADER_PREFIX}{}", group_thousands(count));
    tracing::info!(count, "已更新域名数量头部");
    Ok(())
}

/// 千位逗号分组：123456 -> "123,456"
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

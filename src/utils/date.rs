//! hosts 文件头部日期解析
//!
//! 从 `# Date: ...` 行中模糊提取日期，例如：
//! ```text
//! # Date: 14 October 2026 14:23:11 (UTC)
//! # Date: Oct 14, 2026
//! # Date: 2026-10-14T14:23:11Z
//! ```

use crate::core::grammar::Grammar;
use crate::error::{HostsError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const DATE_PREFIX: &str = "# Date:";

const SINGLE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const TRIPLE_FORMATS: [&str; 3] = ["%d %B %Y", "%B %d %Y", "%Y %B %d"];

/// hosts 文件日期（可排序）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HostsDate {
    pub date: NaiveDate,
    /// 日期所在的原始行
    pub line: String,
}

impl HostsDate {
    /// YYMMDD 形式，用作快照文件名后缀
    pub fn stamp(&self) -> String {
        self.date.format("%y%m%d").to_string()
    }
}

impl fmt::Display for HostsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line.trim_start_matches("# "))
    }
}

/// 从文档中解析头部日期
///
/// # Errors
///
/// 没有 `# Date:` 行或无法识别日期时返回 `DateUnparsable`。
pub fn parse_header_date<S: AsRef<str>>(grammar: &Grammar, document: &[S]) -> Result<HostsDate> {
    let line = document
        .iter()
        .map(|line| line.as_ref())
        .find(|line| grammar.is_date_line(line))
        .ok_or_else(|| HostsError::DateUnparsable("缺少 # Date: 行".to_string()))?;

    let text = line.trim_start_matches(DATE_PREFIX);
    let date = parse_fuzzy(text).ok_or_else(|| HostsError::DateUnparsable(line.to_string()))?;

    Ok(HostsDate {
        date,
        line: line.to_string(),
    })
}

/// 在自由文本中寻找第一个可识别的日期
fn parse_fuzzy(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    for &token in &tokens {
        let head = token.get(..10).unwrap_or(token);
        for format in SINGLE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(head, format) {
                return Some(date);
            }
        }
    }

    tokens.windows(3).find_map(|window| {
        let candidate = window.join(" ");
        TRIPLE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
    })
}

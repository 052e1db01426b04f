//! hosts 行语法
//!
//! 域名限制参考 RFC 1035 / 1123 / 2181 / 3696，兼容 IDNA 的 `xn--` 编码。
//! 采用白名单判定：规范条目、注释、平台固定行之外的一律不合法，
//! 控制字符单独扫描。所有谓词都是纯函数，整行匹配。

use regex::Regex;
use std::sync::LazyLock;

/// 黑名单重定向前缀
pub const REDIRECT_PREFIX: &str = "0.0.0.0 ";

/// 域名数量头部行前缀
pub const COUNT_HEADER_PREFIX: &str = "# Number of unique domains: ";

/// 平台要求的固定行（精确匹配）
pub const PLATFORM_LINES: [&str; 13] = [
    "127.0.0.1 localhost",
    "127.0.0.1 localhost.localdomain",
    "127.0.0.1 local",
    "255.255.255.255 broadcasthost",
    "::1 localhost",
    "::1 ip6-localhost",
    "::1 ip6-loopback",
    "fe80::1%lo0 localhost",
    "ff00::0 ip6-localnet",
    "ff00::0 ip6-mcastprefix",
    "ff02::1 ip6-allnodes",
    "ff02::2 ip6-allrouters",
    "ff02::3 ip6-allhosts",
];

/// 行内禁止出现的控制字符：CR、LF、VT、FF
pub const FORBIDDEN_CONTROLS: [char; 4] = ['\r', '\n', '\x0B', '\x0C'];

const MAX_DOMAIN_LEN: usize = 255;
const MAX_LABELS: usize = 127;
const MAX_PLAIN_SUBLABELS: usize = 126;
const MAX_UNDERSCORE_LABELS: usize = 125;

static SHARED: LazyLock<Grammar> = LazyLock::new(Grammar::new);

/// 编译好的语法表，进程内只构建一次
#[derive(Debug)]
pub struct Grammar {
    label: Regex,
    label_ext: Regex,
    ipv4: Regex,
    comment: Regex,
    count_header: Regex,
    date_line: Regex,
}

impl Grammar {
    fn new() -> Self {
        let compile = |pattern: &str| {
            Regex::new(pattern).unwrap_or_else(|e| panic!("内置正则无效 {pattern}: {e}"))
        };
        Self {
            label: compile(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$"),
            label_ext: compile(r"^[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9_])?$"),
            ipv4: compile(
                r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
            ),
            comment: compile(r"^[ \t]*#[^\r\n\x0B\x0C]*$"),
            count_header: compile(r"^# Number of unique domains: ([0-9][0-9,]*)$"),
            date_line: compile(r"^# Date: .+$"),
        }
    }

    /// 进程共享的语法实例
    pub fn shared() -> &'static Grammar {
        &SHARED
    }

    /// 标准域名：标签仅含 `[a-z0-9-]`，顶级域 2-63 位且不能全为数字
    pub fn is_domain(&self, s: &str) -> bool {
        self.check_domain(s, false)
    }

    /// 扩展域名：非顶级标签允许 `_`
    pub fn is_domain_ext(&self, s: &str) -> bool {
        self.check_domain(s, true)
    }

    fn check_domain(&self, s: &str, allow_underscore: bool) -> bool {
        if s.is_empty() || s.len() > MAX_DOMAIN_LEN {
            return false;
        }
        let labels: Vec<&str> = s.split('.').collect();
        let Some((tld, subs)) = labels.split_last() else {
            return false;
        };
        if subs.is_empty() || !self.is_tld(tld) {
            return false;
        }

        if allow_underscore {
            if labels.len() > MAX_LABELS {
                return false;
            }
            let underscored = subs.iter().filter(|l| l.contains('_')).count();
            underscored <= MAX_UNDERSCORE_LABELS && subs.iter().all(|l| self.label_ext.is_match(l))
        } else {
            subs.len() <= MAX_PLAIN_SUBLABELS && subs.iter().all(|l| self.label.is_match(l))
        }
    }

    fn is_tld(&self, label: &str) -> bool {
        label.len() >= 2
            && self.label.is_match(label)
            && !label.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn is_ipv4(&self, s: &str) -> bool {
        self.ipv4.is_match(s)
    }

    /// 注释：可选前导空白 + `#` + 任意文本（不含禁用控制字符）
    pub fn is_comment(&self, line: &str) -> bool {
        self.comment.is_match(line)
    }

    pub fn is_platform_line(&self, line: &str) -> bool {
        PLATFORM_LINES.contains(&line)
    }

    pub fn has_forbidden_control(&self, line: &str) -> bool {
        line.contains(FORBIDDEN_CONTROLS)
    }

    /// 规范条目：`0.0.0.0 <domain|ipv4>[comment]` 或平台固定行
    pub fn is_canonical_entry(&self, line: &str) -> bool {
        self.is_platform_line(line) || self.is_redirect(line, false)
    }

    /// 宽松条目：同规范重定向，但允许下划线子域名
    pub fn is_permissive_entry(&self, line: &str) -> bool {
        self.is_redirect(line, true)
    }

    fn is_redirect(&self, line: &str, allow_underscore: bool) -> bool {
        let Some(rest) = line.strip_prefix(REDIRECT_PREFIX) else {
            return false;
        };
        let end = rest.find([' ', '\t', '#']).unwrap_or(rest.len());
        let (target, tail) = rest.split_at(end);

        let target_ok = self.is_ipv4(target) || self.check_domain(target, allow_underscore);
        target_ok && (tail.is_empty() || self.is_comment(tail))
    }

    /// 黑名单重定向行：`0.0.0.0 <payload>`，payload 不是 `0.0.0.0` 本身
    pub fn is_counted_redirect(&self, line: &str) -> bool {
        match line.strip_prefix(REDIRECT_PREFIX) {
            Some(payload) => {
                !payload.is_empty() && !payload.starts_with('#') && payload != "0.0.0.0"
            }
            None => false,
        }
    }

    pub fn is_count_header(&self, line: &str) -> bool {
        self.count_header.is_match(line)
    }

    /// 头部声明的数量字段（含千位逗号）
    pub fn count_header_digits<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.count_header
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_date_line(&self, line: &str) -> bool {
        self.date_line.is_match(line)
    }
}

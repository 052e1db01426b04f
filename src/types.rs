//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use serde::Serialize;
use std::fmt;

/// hosts 文件内容：按行存储，不含换行符
pub type Document = Vec<String>;

/// 被标记的行：分类时的原始下标 + 行内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub index: usize,
    pub text: String,
}

impl LineRecord {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

impl fmt::Display for LineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.text.escape_debug())
    }
}

/// 头部声明的域名数量
///
/// 每次需要时从文档重新计算，不跨修改缓存。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    /// 解析出的数量（无头部行或数字溢出时为 None）
    pub declared: Option<usize>,
    /// 头部行原文
    pub header: Option<String>,
}

/// 修复结果：删除的行与保留的（下划线子域名）行，均按下标升序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairOutcome {
    pub removed: Vec<LineRecord>,
    pub kept: Vec<LineRecord>,
}

impl RepairOutcome {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// 运行选项 (支持详细/安静模式切换)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub verbose: bool,
    pub format: OutputFormat,
}

/// 输出格式类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

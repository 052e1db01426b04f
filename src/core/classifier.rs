//! hosts 文件完整性校验：找出所有可疑或不合规的行

use crate::core::grammar::Grammar;
use crate::types::LineRecord;

/// 标记不合规的行，按下标升序返回
///
/// 注释、规范条目、平台固定行以外的行都会被标记，包括空行；
/// 含禁用控制字符的行无论内容如何都会被标记。
/// 下划线子域名行也会被标记，最终去留交给修复阶段决定。
pub fn find_invalid_lines<S: AsRef<str>>(grammar: &Grammar, document: &[S]) -> Vec<LineRecord> {
    document
        .iter()
        .enumerate()
        .map(|(i, line)| (i, line.as_ref()))
        .filter(|(_, line)| is_invalid(grammar, line))
        .map(|(i, line)| LineRecord::new(i, line))
        .collect()
}

fn is_invalid(grammar: &Grammar, line: &str) -> bool {
    grammar.has_forbidden_control(line)
        || !(grammar.is_comment(line) || grammar.is_canonical_entry(line))
}

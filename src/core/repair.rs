//! 清理被标记的行
//!
//! 从后往前处理标记列表：删除下标 i 只会影响 i 右侧的行，
//! 而它们已经处理完毕，所以剩余记录的下标始终有效。

use crate::core::grammar::Grammar;
use crate::types::{LineRecord, RepairOutcome};

/// 修复文档，返回实际删除的行数
///
/// 处理后 `flagged` 为空。
pub fn repair(
    grammar: &Grammar,
    document: &mut Vec<String>,
    flagged: &mut Vec<LineRecord>,
) -> usize {
    repair_detailed(grammar, document, flagged).removed_count()
}

/// 修复文档，并返回删除/保留的明细
///
/// 宽松语法（允许下划线子域名）能匹配的行原样保留，其余从文档中删除。
/// 记录的下标必须指向分类时的文档；内容对不上的记录直接丢弃，不做删除。
pub fn repair_detailed(
    grammar: &Grammar,
    document: &mut Vec<String>,
    flagged: &mut Vec<LineRecord>,
) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();

    while let Some(record) = flagged.pop() {
        if document.get(record.index) != Some(&record.text) {
            tracing::warn!(index = record.index, "标记记录与文档不一致，跳过");
            continue;
        }

        if grammar.is_permissive_entry(&record.text) {
            tracing::debug!(index = record.index, line = %record.text.escape_debug(), "保留行");
            outcome.kept.push(record);
        } else {
            document.remove(record.index);
            tracing::debug!(index = record.index, line = %record.text.escape_debug(), "删除行");
            outcome.removed.push(record);
        }
    }

    outcome.removed.reverse();
    outcome.kept.reverse();

    tracing::info!(
        removed = outcome.removed.len(),
        kept = outcome.kept.len(),
        total = document.len(),
        "清理完成"
    );
    outcome
}

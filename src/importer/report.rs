// ==========================================
// 高校管理系统 - 导入报告导出
// ==========================================
// 文本格式: 首行汇总，其后每行 "line N: message"
// CSV 格式: line,kind,message（扩展名为 .csv 时使用）
// ==========================================

use crate::domain::ImportOutcome;
use crate::importer::error::{ImportError, ImportResult};
use csv::{Terminator, WriterBuilder};
use std::path::Path;

/// 汇总行
pub fn summary_line(outcome: &ImportOutcome) -> String {
    format!(
        "{} records succeeded, {} failed",
        outcome.success_count(),
        outcome.error_count()
    )
}

/// 文本报告
pub fn render_text_report(outcome: &ImportOutcome) -> String {
    let mut text = summary_line(outcome);
    text.push('\n');
    for line in outcome.report_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// CSV 报告（仅失败行）
pub fn render_csv_report(outcome: &ImportOutcome) -> ImportResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["line", "kind", "message"])?;
    for error in outcome.errors() {
        writer.write_record([
            error.line_number.to_string(),
            error.kind.to_string(),
            error.message.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::InternalError(e.to_string()))
}

/// 写出报告文件，按扩展名选择格式
pub fn write_report(outcome: &ImportOutcome, path: &Path) -> ImportResult<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let content = if is_csv {
        render_csv_report(outcome)?
    } else {
        render_text_report(outcome)
    };

    std::fs::write(path, content)
        .map_err(|e| ImportError::OutputWriteError(format!("{}: {}", path.display(), e)))
}

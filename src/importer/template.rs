// ==========================================
// 高校管理系统 - 导入模板生成
// ==========================================
// 输出: 表头 + 一行示例数据，与导入文件同一分隔规则
// ==========================================

use crate::domain::RecordKind;
use crate::importer::error::{ImportError, ImportResult};
use csv::{Terminator, WriterBuilder};
use std::path::Path;

/// 示例数据行
fn example_row(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Student => &[
            "John Doe",
            "john.doe@example.com",
            "9876543210",
            "Computer Science",
            "1",
            "A",
            "Password@123",
        ],
        RecordKind::Teacher => &[
            "Jane Smith",
            "jane.smith@example.com",
            "9876543210",
            "Computer Science",
            "M.Tech, PhD",
            "5",
            "Data Structures;Algorithms",
            "Password@123",
        ],
    }
}

/// 生成模板文本
pub fn render_template(kind: RecordKind) -> ImportResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(kind.columns())?;
    writer.write_record(example_row(kind))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::InternalError(e.to_string()))
}

/// 写出模板文件
pub fn write_template(kind: RecordKind, path: &Path) -> ImportResult<()> {
    let content = render_template(kind)?;
    std::fs::write(path, content)
        .map_err(|e| ImportError::OutputWriteError(format!("{}: {}", path.display(), e)))
}

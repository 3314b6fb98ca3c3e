// ==========================================
// 高校管理系统 - 分隔文本解析器
// ==========================================
// 规则:
// - 逗号分隔，双引号为可选引用符
// - 引号切换“引用区”，引用区内的分隔符按字面处理
// - 引用区内连续两个引号 "" 表示一个字面引号
// - 每个物理行独立解析，不支持跨行引用字段
// - 行尾仍在引用区内 → 标记为引号未闭合，由调用方决定处理方式
// - 空白行在解析前剔除，保留其余行的物理行号
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_importer_trait::RowParser;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// 解析后的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line_number: usize,      // 1-based 物理行号
    pub fields: Vec<String>,     // 已 TRIM
    pub unterminated_quote: bool,
}

impl ParsedRow {
    /// 按位置取字段，缺失的尾部字段视为空
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

// ==========================================
// DelimitedTextParser
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct DelimitedTextParser {
    delimiter: char,
    quote: char,
}

impl Default for DelimitedTextParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl DelimitedTextParser {
    pub fn new(delimiter: char, quote: char) -> Self {
        Self { delimiter, quote }
    }

    /// 解析单行
    ///
    /// # 返回
    /// - (字段列表, 是否引号未闭合)
    pub fn parse_line(&self, line: &str) -> (Vec<String>, bool) {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut just_closed = false;

        for ch in line.chars() {
            if ch == self.quote {
                if !in_quotes && just_closed {
                    // "" 转义：写入字面引号并回到引用区
                    current.push(ch);
                    in_quotes = true;
                    just_closed = false;
                } else {
                    just_closed = in_quotes;
                    in_quotes = !in_quotes;
                }
                continue;
            }

            just_closed = false;
            if ch == self.delimiter && !in_quotes {
                fields.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(ch);
            }
        }
        fields.push(current.trim().to_string());

        (fields, in_quotes)
    }
}

impl RowParser for DelimitedTextParser {
    fn parse_rows(&self, content: &str) -> Vec<ParsedRow> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                let (fields, unterminated_quote) = self.parse_line(line);
                ParsedRow {
                    line_number: idx + 1,
                    fields,
                    unterminated_quote,
                }
            })
            .collect()
    }
}

/// 读取源文件为文本
///
/// # 返回
/// - Err(FileNotFound / FileReadError): 结构性错误
pub fn read_source(file_path: &Path) -> ImportResult<String> {
    if !file_path.exists() {
        return Err(ImportError::FileNotFound(file_path.display().to_string()));
    }

    let bytes = std::fs::read(file_path)?;
    String::from_utf8(bytes).map_err(|e| {
        ImportError::FileReadError(format!(
            "{} is not valid UTF-8: {}",
            file_path.display(),
            e
        ))
    })
}

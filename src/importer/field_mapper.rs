// ==========================================
// 高校管理系统 - 字段映射器实现
// ==========================================
// 职责: 位置列布局 → 强类型导入记录 + 必填校验 + 院系解析
// 规则:
// - 尾部缺失的可选列视为空
// - 必填列按布局顺序检查，报告第一个缺失列，不做部分恢复
// - 口令列为空且配置了默认口令时使用默认口令
// ==========================================

use crate::config::ImportSettings;
use crate::domain::{ImportRow, LineErrorKind, RecordKind, StudentImportRow, TeacherImportRow};
use crate::importer::data_cleaner::DataCleaner as DefaultDataCleaner;
use crate::importer::file_parser::ParsedRow;
use crate::importer::record_importer_trait::DataCleaner;
use crate::importer::reference_resolver::ReferenceIndex;

// ===== 学生列位置 =====
mod student_col {
    pub const NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const MOBILE: usize = 2;
    pub const DEPARTMENT: usize = 3;
    pub const SEMESTER: usize = 4;
    pub const SECTION: usize = 5;
    pub const PASSWORD: usize = 6;
}

// ===== 教师列位置 =====
mod teacher_col {
    pub const NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const MOBILE: usize = 2;
    pub const DEPARTMENT: usize = 3;
    pub const QUALIFICATION: usize = 4;
    pub const EXPERIENCE: usize = 5;
    pub const SUBJECTS: usize = 6;
    pub const PASSWORD: usize = 7;
}

/// 单行被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub kind: LineErrorKind,
    pub message: String,
}

impl RowRejection {
    fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: LineErrorKind::Validation,
            message: message.into(),
        }
    }

    fn missing(column: &str) -> Self {
        Self::validation(format!("missing required field: {}", column))
    }
}

/// 必填字段（已 TRIM）
struct RequiredFields {
    name: String,
    email: String,
    department: String,
    password: String,
}

pub struct FieldMapper {
    cleaner: Box<dyn DataCleaner>,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(Box::new(DefaultDataCleaner))
    }
}

impl FieldMapper {
    pub fn new(cleaner: Box<dyn DataCleaner>) -> Self {
        Self { cleaner }
    }

    /// 将一行映射为导入记录
    ///
    /// # 返回
    /// - Ok(ImportRow): 必填齐全、类型正确、院系已解析
    /// - Err(RowRejection): Validation（缺失/类型）或 Resolution（院系）
    pub fn map_row(
        &self,
        kind: RecordKind,
        row: &ParsedRow,
        index: &ReferenceIndex,
        settings: &ImportSettings,
    ) -> Result<ImportRow, RowRejection> {
        match kind {
            RecordKind::Student => self
                .map_student(row, index, settings)
                .map(ImportRow::Student),
            RecordKind::Teacher => self
                .map_teacher(row, index, settings)
                .map(ImportRow::Teacher),
        }
    }

    fn map_student(
        &self,
        row: &ParsedRow,
        index: &ReferenceIndex,
        settings: &ImportSettings,
    ) -> Result<StudentImportRow, RowRejection> {
        let columns = RecordKind::Student.columns();
        let required = self.required_fields(
            row,
            columns,
            [
                student_col::NAME,
                student_col::EMAIL,
                student_col::DEPARTMENT,
                student_col::PASSWORD,
            ],
            settings,
        )?;

        let semester = self.parse_semester(row.field(student_col::SEMESTER), settings)?;
        let department_id = self.resolve_department(&required.department, index)?;

        Ok(StudentImportRow {
            line_number: row.line_number,
            name: required.name,
            email: required.email,
            department_id,
            department_name: required.department,
            password: required.password,
            mobile: self.cleaner.clean_mobile(row.field(student_col::MOBILE)),
            semester,
            section: self
                .cleaner
                .normalize_null(Some(row.field(student_col::SECTION).to_string())),
        })
    }

    fn map_teacher(
        &self,
        row: &ParsedRow,
        index: &ReferenceIndex,
        settings: &ImportSettings,
    ) -> Result<TeacherImportRow, RowRejection> {
        let columns = RecordKind::Teacher.columns();
        let required = self.required_fields(
            row,
            columns,
            [
                teacher_col::NAME,
                teacher_col::EMAIL,
                teacher_col::DEPARTMENT,
                teacher_col::PASSWORD,
            ],
            settings,
        )?;

        let experience_years = self.parse_experience(row.field(teacher_col::EXPERIENCE))?;
        let department_id = self.resolve_department(&required.department, index)?;

        Ok(TeacherImportRow {
            line_number: row.line_number,
            name: required.name,
            email: required.email,
            department_id,
            department_name: required.department,
            password: required.password,
            mobile: self.cleaner.clean_mobile(row.field(teacher_col::MOBILE)),
            qualification: self
                .cleaner
                .normalize_null(Some(row.field(teacher_col::QUALIFICATION).to_string())),
            experience_years,
            subjects: self.cleaner.split_subjects(row.field(teacher_col::SUBJECTS)),
        })
    }

    /// 按布局顺序检查必填列: 姓名 → 邮箱 → 院系 → 口令
    fn required_fields(
        &self,
        row: &ParsedRow,
        columns: &[&str],
        [name_col, email_col, department_col, password_col]: [usize; 4],
        settings: &ImportSettings,
    ) -> Result<RequiredFields, RowRejection> {
        let name = self.cleaner.clean_text(row.field(name_col));
        if name.is_empty() {
            return Err(RowRejection::missing(columns[name_col]));
        }

        let email = self.cleaner.clean_email(row.field(email_col));
        if email.is_empty() {
            return Err(RowRejection::missing(columns[email_col]));
        }

        let department = self.cleaner.clean_text(row.field(department_col));
        if department.is_empty() {
            return Err(RowRejection::missing(columns[department_col]));
        }

        let password = match self
            .cleaner
            .normalize_null(Some(row.field(password_col).to_string()))
        {
            Some(p) => p,
            None => settings
                .default_password
                .clone()
                .ok_or_else(|| RowRejection::missing(columns[password_col]))?,
        };

        Ok(RequiredFields {
            name,
            email,
            department,
            password,
        })
    }

    fn parse_semester(
        &self,
        raw: &str,
        settings: &ImportSettings,
    ) -> Result<Option<u32>, RowRejection> {
        let Some(value) = self.cleaner.normalize_null(Some(raw.to_string())) else {
            return Ok(None);
        };

        match value.parse::<u32>() {
            Ok(n) if (1..=settings.max_semester).contains(&n) => Ok(Some(n)),
            _ => Err(RowRejection::validation(format!(
                "invalid Semester: {} (expected 1..={})",
                value, settings.max_semester
            ))),
        }
    }

    fn parse_experience(&self, raw: &str) -> Result<Option<u32>, RowRejection> {
        let Some(value) = self.cleaner.normalize_null(Some(raw.to_string())) else {
            return Ok(None);
        };

        value.parse::<u32>().map(Some).map_err(|_| {
            RowRejection::validation(format!(
                "invalid Experience: {} (expected a whole number of years)",
                value
            ))
        })
    }

    fn resolve_department(
        &self,
        department: &str,
        index: &ReferenceIndex,
    ) -> Result<String, RowRejection> {
        index
            .resolve(department)
            .map(str::to_string)
            .map_err(|e| RowRejection {
                kind: LineErrorKind::Resolution,
                message: e.to_string(),
            })
    }
}

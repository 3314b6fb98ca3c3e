// ==========================================
// 高校管理系统 - 批量导入命令行入口
// ==========================================
// 子命令: import / template / departments / config (list/set)
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use college_import::config::get_default_db_path;
use college_import::importer::{summary_line, write_report, write_template};
use college_import::{logging, ActorContext, ImportApi, RecordKind};
use std::path::PathBuf;
use tracing::info;

/// 学生/教师名单批量导入
#[derive(Parser, Debug)]
#[command(name = "college-import")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 数据库文件路径
    #[arg(long, env = "COLLEGE_IMPORT_DB_PATH", global = true)]
    db: Option<String>,

    /// 输出 debug 级别日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 以 JSON 行格式输出日志
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 导入学生或教师名单
    Import {
        /// 记录类型: student | teacher
        #[arg(short, long)]
        kind: RecordKind,

        /// 源文件路径
        #[arg(short, long)]
        file: PathBuf,

        /// 操作人 ID
        #[arg(long, default_value = "system")]
        actor: String,

        /// 导出报告（.csv 为表格，其余为文本）
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 输出导入模板
    Template {
        /// 记录类型: student | teacher
        #[arg(short, long)]
        kind: RecordKind,

        /// 输出文件（缺省输出到标准输出）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// 院系参照数据
    Departments {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// 导入配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum DepartmentAction {
    /// 列出院系
    List,

    /// 新增院系
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        code: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 列出已写入的配置项
    List,

    /// 写入配置项（import.max_rows / import.max_semester / import.default_password）
    Set {
        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    if cli.log_json {
        logging::init_json(level);
    } else {
        logging::init_with_default(level);
    }

    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    info!(version = college_import::VERSION, db_path = %db_path, "college-import 启动");

    let api = ImportApi::new(db_path);

    match cli.command {
        Commands::Import {
            kind,
            file,
            actor,
            report,
        } => {
            let actor = ActorContext::new(actor);
            let response = api
                .import_file(kind, &file, &actor)
                .await
                .with_context(|| format!("import of {} failed", file.display()))?;

            println!("{}", summary_line(&response.outcome));
            for line in response.report_lines() {
                println!("{}", line);
            }

            if let Some(path) = report {
                write_report(&response.outcome, &path)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                info!(path = %path.display(), "报告已导出");
            }
        }

        Commands::Template { kind, out } => match out {
            Some(path) => {
                write_template(kind, &path)
                    .with_context(|| format!("failed to write template to {}", path.display()))?;
                info!(kind = %kind, path = %path.display(), "模板已导出");
            }
            None => print!("{}", api.template(kind)?),
        },

        Commands::Departments { action } => match action {
            DepartmentAction::List => {
                for dept in api.list_departments()? {
                    println!(
                        "{}\t{}\t{}",
                        dept.department_id,
                        dept.name,
                        dept.code.as_deref().unwrap_or("-")
                    );
                }
            }
            DepartmentAction::Add { name, code } => {
                let dept = api.add_department(&name, code.as_deref())?;
                println!("{}\t{}", dept.department_id, dept.name);
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::List => {
                for (key, value) in api.list_config()? {
                    println!("{}\t{}", key, value);
                }
            }
            ConfigAction::Set { key, value } => {
                api.set_config(&key, &value)?;
                info!(key = %key, "配置已写入");
            }
        },
    }

    Ok(())
}

//! # 批处理报告写入
//!
//! 将失败项的诊断输出和整批汇总写入日志目录，并打印汇总。
//!
//! ## 输出布局
//! ```text
//! <log-dir>/
//!   ├── batch_report.csv     (item_id, success, error_log)
//!   └── errors/<item-id>.log (stdout + stderr)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/segment.rs`, `commands/render.rs` 调用
//! - 使用 `csv` 写入汇总表
//! - 使用 `utils/output.rs` 打印汇总

use crate::error::{MeshkitError, Result};
use crate::models::BatchReport;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 汇总表文件名
pub const REPORT_FILE: &str = "batch_report.csv";

/// 失败日志子目录
pub const ERRORS_DIR: &str = "errors";

/// 汇总表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub item_id: String,
    pub success: bool,
    pub error_log: Option<PathBuf>,
}

/// 报告写入器
pub struct ReportWriter {
    log_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// 汇总表路径
    pub fn report_path(&self) -> PathBuf {
        self.log_dir.join(REPORT_FILE)
    }

    /// 失败项诊断日志路径，仅由标识符决定
    pub fn error_log_path(&self, item_id: &str) -> PathBuf {
        self.log_dir
            .join(ERRORS_DIR)
            .join(format!("{}.log", item_id))
    }

    /// 写入失败日志与汇总表，返回写入的行
    pub fn write(&self, report: &BatchReport) -> Result<Vec<ReportRow>> {
        create_dir(&self.log_dir)?;

        let mut rows = Vec::with_capacity(report.total());
        let mut errors_dir_ready = false;

        for result in report.results() {
            let error_log = if result.success {
                None
            } else {
                if !errors_dir_ready {
                    create_dir(&self.log_dir.join(ERRORS_DIR))?;
                    errors_dir_ready = true;
                }
                let path = self.error_log_path(&result.item_id);
                fs::write(&path, result.diagnostic_text()).map_err(|e| {
                    MeshkitError::FileWriteError {
                        path: path.display().to_string(),
                        source: e,
                    }
                })?;
                Some(path)
            };

            rows.push(ReportRow {
                item_id: result.item_id.clone(),
                success: result.success,
                error_log,
            });
        }

        self.write_csv(&rows)?;
        Ok(rows)
    }

    /// 写入汇总表
    fn write_csv(&self, rows: &[ReportRow]) -> Result<()> {
        let report_path = self.report_path();
        let mut wtr = csv::Writer::from_path(&report_path).map_err(MeshkitError::CsvError)?;

        wtr.write_record(["item_id", "success", "error_log"])
            .map_err(MeshkitError::CsvError)?;

        for row in rows {
            wtr.write_record([
                row.item_id.clone(),
                row.success.to_string(),
                row.error_log
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ])
            .map_err(MeshkitError::CsvError)?;
        }

        wtr.flush().map_err(|e| MeshkitError::FileWriteError {
            path: report_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// 打印失败日志位置与汇总行
    pub fn print_summary(&self, report: &BatchReport, rows: &[ReportRow]) {
        for row in rows {
            if let Some(log) = &row.error_log {
                output::print_log_path(&row.item_id, log);
            }
        }
        output::print_separator();
        output::print_info(&format!("Report written to {}", self.report_path().display()));
        output::print_done(&report.summary_line());
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| MeshkitError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

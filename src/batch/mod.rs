//! # 批量执行模块
//!
//! 提供统一的外部进程批处理能力。
//!
//! ## 功能
//! - 工作项发现（子目录 / 分割部件）
//! - 类型化命令构造与进程调用
//! - 有界并发分发
//! - 失败日志与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/segment.rs`, `commands/render.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod command;
pub mod discovery;
pub mod invoker;
pub mod report;
pub mod runner;

pub use collector::FileCollector;
pub use command::{CommandTemplate, RenderConfig, SegmentConfig};
pub use discovery::{discover_part_items, discover_work_items};
pub use invoker::ProcessInvoker;
pub use report::ReportWriter;
pub use runner::BatchDispatcher;

use crate::error::Result;
use crate::models::{BatchReport, WorkItem};
use crate::utils::output;

use std::path::Path;

/// 分发全部工作项并写入报告
///
/// 单项失败只体现在报告中；发现之后的致命错误仅来自报告写入。
pub fn run_batch<T: CommandTemplate>(
    items: &[WorkItem],
    template: T,
    workers: usize,
    log_dir: &Path,
) -> Result<BatchReport> {
    let dispatcher = BatchDispatcher::new(workers);
    output::print_info(&format!(
        "Dispatching {} item(s) on {} worker(s)",
        items.len(),
        dispatcher.workers()
    ));

    let invoker = ProcessInvoker::new(template);
    let report = dispatcher.dispatch(items, |item| invoker.invoke(item))?;

    let writer = ReportWriter::new(log_dir);
    let rows = writer.write(&report)?;
    writer.print_summary(&report, &rows);

    Ok(report)
}

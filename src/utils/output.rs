//! # 终端输出
//!
//! 批处理逐项状态、失败日志位置、审阅表格标记等统一的终端样式。
//!
//! 逐项状态行由分发线程打印，worker 线程不直接写终端。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `batch/report.rs`, `batch/discovery.rs` 使用
//! - 被 `commands/`, `review/store.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::path::Path;

/// 工作项成功
pub fn print_item_ok(item_id: &str) {
    println!("{} {}", "[OK]".green().bold(), item_id);
}

/// 工作项失败，`reason` 为简短原因
pub fn print_item_fail(item_id: &str, reason: &str) {
    println!("{} {} ({})", "[FAIL]".red().bold(), item_id, reason);
}

/// 失败日志位置
pub fn print_log_path(item_id: &str, log: &Path) {
    println!(
        "{} {} -> {}",
        "[LOG]".yellow().bold(),
        item_id,
        log.display().to_string().dimmed()
    );
}

/// 质检标记已更新
pub fn print_marked(mesh_id: &str, what: &str, checked: bool) {
    let state = if checked { "OK".green() } else { "not OK".red() };
    println!("{} {} {} marked {}", "[OK]".green().bold(), mesh_id, what, state);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 汇总行
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 命令标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 审阅表格中的布尔标记
pub fn mark(flag: bool) -> &'static str {
    if flag {
        "✅"
    } else {
        "❌"
    }
}

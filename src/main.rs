//! # meshkit - 网格分割数据集批处理与审阅工具
//!
//! 对数据集中的每个网格批量运行外部分割流水线，
//! 可选调用外部 3D 工具渲染分割部件，并提供命令行审阅与质检状态标记。
//!
//! ## 子命令
//! - `segment` - 批量运行网格分割流水线
//! - `render`  - 批量渲染分割部件 (Blender)
//! - `review`  - 审阅结果并标记质检状态
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (发现、执行、分发、报告)
//!   │     ├── review/    (结果扫描与状态存储)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod review;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `review/`, `models/`, `utils/`
//! - 子模块: segment, render, review

pub mod render;
pub mod review;
pub mod segment;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Segment(args) => segment::execute(args),
        Commands::Render(args) => render::execute(args),
        Commands::Review(args) => review::execute(args),
    }
}

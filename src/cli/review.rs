//! # review 子命令 CLI 定义
//!
//! 结果审阅统一入口，包含多个子命令：
//! - `groups`: 列出分组
//! - `summary`: 分组概览（拼图、渲染、描述）
//! - `failed`: 渲染未通过质检的网格
//! - `status`: 已记录的质检状态
//! - `mark`: 更新质检标记
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/review.rs`

use clap::{Args, Subcommand};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Review 主命令
// ─────────────────────────────────────────────────────────────

/// review 主命令参数
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Results root whose subdirectories are groups of mesh directories
    #[arg(long, global = true, env = "MESHKIT_REVIEW_ROOT", default_value = "outputs/mesh_segmentation_output")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: ReviewCommands,
}

/// review 子命令
#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// List groups under the results root
    Groups,

    /// Summarize a group: collages, renders and captions per mesh
    Summary(SummaryArgs),

    /// List meshes whose render has not been marked OK
    Failed(GroupArg),

    /// Show recorded quality-control status for a group
    Status(GroupArg),

    /// Mark or unmark a quality-control check
    Mark(MarkArgs),
}

/// 仅需分组名的子命令参数
#[derive(Args, Debug)]
pub struct GroupArg {
    /// Group name (a directory under the results root)
    #[arg(long)]
    pub group: String,
}

// ─────────────────────────────────────────────────────────────
// summary
// ─────────────────────────────────────────────────────────────

/// summary 子命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Group name (a directory under the results root)
    #[arg(long)]
    pub group: String,

    /// Only show captions with this suffix ('all' shows every caption)
    #[arg(long, default_value = "all")]
    pub caption_suffix: String,

    /// Page to display (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Meshes per page
    #[arg(long, default_value_t = 20)]
    pub per_page: usize,

    /// Print caption text and render image paths under the table
    #[arg(long, default_value_t = false)]
    pub details: bool,
}

// ─────────────────────────────────────────────────────────────
// mark
// ─────────────────────────────────────────────────────────────

/// mark 子命令参数
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("check").required(true).args(["render", "caption"])))]
pub struct MarkArgs {
    /// Group name (a directory under the results root)
    #[arg(long)]
    pub group: String,

    /// Mesh identifier
    #[arg(long)]
    pub mesh_id: String,

    /// Mark the render check
    #[arg(long)]
    pub render: bool,

    /// Mark the caption check for this suffix
    #[arg(long)]
    pub caption: Option<String>,

    /// Clear the check instead of setting it
    #[arg(long, default_value_t = false)]
    pub unchecked: bool,
}

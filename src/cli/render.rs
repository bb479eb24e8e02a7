//! # render 子命令 CLI 定义
//!
//! 使用 Blender 批量渲染分割部件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/render.rs`

use clap::Args;
use std::path::PathBuf;

/// render 子命令参数
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Group output folder whose subdirectories hold <mesh_id>_label_<n>.glb parts
    #[arg(long)]
    pub mesh_root: PathBuf,

    /// Blender executable
    #[arg(long, env = "MESHKIT_BLENDER", default_value = "blender")]
    pub blender: PathBuf,

    /// Render script executed inside Blender
    #[arg(long, default_value = "src/ys/blender_render_script_type1.py")]
    pub script: PathBuf,

    /// Maximum concurrent Blender processes (0 = number of CPUs)
    #[arg(long, default_value_t = 0)]
    pub max_workers: usize,

    /// Directory for batch_report.csv and per-failure logs
    #[arg(long, default_value = "render_logs")]
    pub log_dir: PathBuf,
}

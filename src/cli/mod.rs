//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `segment`: 批量网格分割
//! - `render`: 批量部件渲染
//! - `review`: 结果审阅（嵌套子命令）
//!   - `groups` / `summary` / `failed` / `status` / `mark`
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: segment, render, review

pub mod render;
pub mod review;
pub mod segment;

use clap::{Parser, Subcommand};

/// meshkit - 网格分割数据集批处理与审阅工具
#[derive(Parser)]
#[command(name = "meshkit")]
#[command(version)]
#[command(about = "Batch runner and review toolkit for 3D mesh segmentation datasets", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run the mesh segmentation pipeline on every mesh under a split folder
    Segment(segment::SegmentArgs),

    /// Render every segmented part with Blender
    Render(render::RenderArgs),

    /// Inspect results and record quality-control status
    Review(review::ReviewArgs),
}

//! # segment 子命令 CLI 定义
//!
//! 对分组目录下的每个网格运行分割流水线
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/segment.rs`

use clap::Args;
use std::path::PathBuf;

/// segment 子命令参数
#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Split folder whose subdirectories are mesh asset directories (e.g. 000-000)
    #[arg(long)]
    pub split_dir: PathBuf,

    /// Pipeline configuration file, passed through to the pipeline
    #[arg(long)]
    pub config: PathBuf,

    /// Output root, passed through to the pipeline
    #[arg(long)]
    pub output: PathBuf,

    /// Caption prefixes passed through to the pipeline
    #[arg(long, num_args = 1.., default_values = ["matte_", "segmented_"])]
    pub prefixes: Vec<String>,

    /// Render resolution as WIDTH HEIGHT
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [2048u32, 2048])]
    pub resolution: Vec<u32>,

    /// Clear each mesh's output directory before processing
    #[arg(long, default_value_t = false)]
    pub clear_dir: bool,

    /// Ask the pipeline to write visualizations
    #[arg(long, default_value_t = false)]
    pub visualize: bool,

    /// Maximum concurrent pipeline processes (0 = number of CPUs)
    #[arg(long, default_value_t = 0)]
    pub max_workers: usize,

    /// Directory for batch_report.csv and per-failure logs
    #[arg(long, default_value = "batch_logs")]
    pub log_dir: PathBuf,

    /// Segmentation pipeline script
    #[arg(long, env = "MESHKIT_PIPELINE", default_value = "src/ys/mesh_segmentation_pipeline.py")]
    pub pipeline: PathBuf,

    /// Python interpreter used to run the pipeline
    #[arg(long, env = "MESHKIT_PYTHON", default_value = "python3")]
    pub python: String,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> super::SegmentArgs {
        let mut argv = vec!["meshkit", "segment"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Segment(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--split-dir", "s", "--config", "c.yaml", "--output", "o"]);
        assert_eq!(args.prefixes, vec!["matte_", "segmented_"]);
        assert_eq!(args.resolution, vec![2048, 2048]);
        assert!(!args.clear_dir && !args.visualize);
        assert_eq!(args.max_workers, 0);
        assert_eq!(args.log_dir.to_str(), Some("batch_logs"));
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--split-dir",
            "s",
            "--config",
            "c.yaml",
            "--output",
            "o",
            "--prefixes",
            "a_",
            "b_",
            "c_",
            "--resolution",
            "1024",
            "768",
            "--clear-dir",
            "--max-workers",
            "4",
        ]);
        assert_eq!(args.prefixes, vec!["a_", "b_", "c_"]);
        assert_eq!(args.resolution, vec![1024, 768]);
        assert!(args.clear_dir);
        assert_eq!(args.max_workers, 4);
    }

    #[test]
    fn test_missing_required() {
        assert!(Cli::try_parse_from(["meshkit", "segment", "--split-dir", "s"]).is_err());
    }
}

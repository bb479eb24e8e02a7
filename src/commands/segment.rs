//! # segment 命令实现
//!
//! 对分组目录下的每个网格并行运行分割流水线。
//!
//! ## 功能
//! - 发现网格资源目录
//! - 有界并发调用外部流水线
//! - 写入失败日志与 `batch_report.csv`
//!
//! 部分失败不改变退出状态，只体现在报告和汇总中。
//!
//! ## 依赖关系
//! - 使用 `cli/segment.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{self, SegmentConfig};
use crate::cli::segment::SegmentArgs;
use crate::error::{MeshkitError, Result};
use crate::utils::output;

/// 执行 segment 命令
pub fn execute(args: SegmentArgs) -> Result<()> {
    output::print_header("Batch Mesh Segmentation");

    let items = batch::discover_work_items(&args.split_dir)?;
    output::print_info(&format!(
        "{} meshes found in {}",
        items.len(),
        args.split_dir.display()
    ));

    let log_dir = args.log_dir.clone();
    let workers = args.max_workers;
    let config = segment_config(args)?;

    batch::run_batch(&items, config, workers, &log_dir)?;
    Ok(())
}

/// 命令行参数转换为流水线配置
fn segment_config(args: SegmentArgs) -> Result<SegmentConfig> {
    let resolution = match args.resolution.as_slice() {
        [w, h] => (*w, *h),
        other => {
            return Err(MeshkitError::InvalidArgument(format!(
                "--resolution expects WIDTH HEIGHT, got {} value(s)",
                other.len()
            )))
        }
    };

    if args.prefixes.is_empty() {
        return Err(MeshkitError::InvalidArgument(
            "--prefixes needs at least one value".to_string(),
        ));
    }

    Ok(SegmentConfig {
        python: args.python,
        pipeline: args.pipeline,
        config: args.config,
        output: args.output,
        prefixes: args.prefixes,
        resolution,
        clear_dir: args.clear_dir,
        visualize: args.visualize,
    })
}

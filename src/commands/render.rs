//! # render 命令实现
//!
//! 使用 Blender 批量渲染每个网格的分割部件。
//!
//! ## 功能
//! - 发现 `<mesh_id>_label_<n>.glb` 部件
//! - 每个部件渲染到 `<网格目录>/renders/label_<n>`
//! - 与 segment 共用分发器和报告写入
//!
//! ## 依赖关系
//! - 使用 `cli/render.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{self, RenderConfig};
use crate::cli::render::RenderArgs;
use crate::error::{MeshkitError, Result};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行 render 命令
pub fn execute(args: RenderArgs) -> Result<()> {
    output::print_header("Batch Part Rendering");

    if !args.script.is_file() {
        return Err(MeshkitError::FileNotFound {
            path: args.script.display().to_string(),
        });
    }

    // 传给 Blender 的路径均为绝对路径
    let items = batch::discover_part_items(&absolute(&args.mesh_root)?)?;
    output::print_info(&format!(
        "{} parts found under {}",
        items.len(),
        args.mesh_root.display()
    ));

    let config = RenderConfig {
        blender: args.blender,
        script: absolute(&args.script)?,
    };

    batch::run_batch(&items, config, args.max_workers, &args.log_dir)?;
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| MeshkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(mesh_root: &Path, script: &Path, log_dir: &Path, blender: &str) -> RenderArgs {
        RenderArgs {
            mesh_root: mesh_root.to_path_buf(),
            blender: PathBuf::from(blender),
            script: script.to_path_buf(),
            max_workers: 2,
            log_dir: log_dir.to_path_buf(),
        }
    }

    #[test]
    fn test_missing_script_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = execute(args(
            tmp.path(),
            &tmp.path().join("render.py"),
            &tmp.path().join("logs"),
            "blender",
        ))
        .unwrap_err();
        assert!(matches!(err, MeshkitError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_blender_is_recorded_per_part() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("group");
        let mesh = root.join("m1");
        fs::create_dir_all(&mesh).unwrap();
        fs::write(mesh.join("m1_label_1.glb"), "").unwrap();
        fs::write(mesh.join("m1_label_2.glb"), "").unwrap();
        let script = tmp.path().join("render.py");
        fs::write(&script, "").unwrap();
        let log_dir = tmp.path().join("logs");

        execute(args(
            &root,
            &script,
            &log_dir,
            "meshkit-definitely-missing-blender",
        ))
        .unwrap();

        assert!(mesh.join("renders/label_1").is_dir());
        assert!(mesh.join("renders/label_2").is_dir());
        let log = fs::read_to_string(log_dir.join("errors/m1_label_1.log")).unwrap();
        assert!(log.contains("Failed to start"));
        assert!(log_dir.join("errors/m1_label_2.log").is_file());
    }
}

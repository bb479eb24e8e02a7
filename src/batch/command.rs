//! # 外部命令构造
//!
//! 由类型化配置为每个工作项确定性地构造外部进程参数列表。
//!
//! ## 功能
//! - `SegmentConfig`: 网格分割流水线调用
//! - `RenderConfig`: Blender 部件渲染调用
//!
//! 构造函数为纯函数，不启动任何进程，便于单元测试。
//!
//! ## 依赖关系
//! - 被 `batch/invoker.rs` 调用
//! - 配置由 `commands/segment.rs`, `commands/render.rs` 从命令行参数转换

use crate::error::{MeshkitError, Result};
use crate::models::WorkItem;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// 一次外部进程调用：程序与参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// 工作项到外部命令的映射
pub trait CommandTemplate: Send + Sync {
    /// 构造该工作项的命令行
    fn build(&self, item: &WorkItem) -> CommandLine;

    /// 启动进程前的准备工作（如创建输出目录）
    fn prepare(&self, _item: &WorkItem) -> Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
// 网格分割流水线
// ─────────────────────────────────────────────────────────────

/// 分割流水线的共享配置，所有工作项只读共享
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Python 解释器
    pub python: String,
    /// 流水线脚本路径
    pub pipeline: PathBuf,
    /// 流水线配置文件
    pub config: PathBuf,
    /// 输出根目录
    pub output: PathBuf,
    /// 描述前缀列表
    pub prefixes: Vec<String>,
    /// 渲染分辨率 (宽, 高)
    pub resolution: (u32, u32),
    /// 处理前清空输出目录
    pub clear_dir: bool,
    /// 输出可视化结果
    pub visualize: bool,
}

impl CommandTemplate for SegmentConfig {
    fn build(&self, item: &WorkItem) -> CommandLine {
        let mut cmd = CommandLine::new(&self.python)
            .path_arg(&self.pipeline)
            .arg("--config")
            .path_arg(&self.config)
            .arg("--mesh-id")
            .arg(item.id())
            .arg("--assets-dir")
            .path_arg(item.source())
            .arg("--output-dir")
            .path_arg(&self.output)
            .arg("--prefixes");

        for prefix in &self.prefixes {
            cmd = cmd.arg(prefix);
        }

        cmd = cmd
            .arg("--resolution")
            .arg(self.resolution.0.to_string())
            .arg(self.resolution.1.to_string());

        if self.clear_dir {
            cmd = cmd.arg("--clear-dir");
        }
        if self.visualize {
            cmd = cmd.arg("--visualize");
        }

        cmd
    }
}

// ─────────────────────────────────────────────────────────────
// Blender 部件渲染
// ─────────────────────────────────────────────────────────────

/// 渲染批处理的共享配置
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Blender 可执行文件
    pub blender: PathBuf,
    /// Blender 内运行的渲染脚本
    pub script: PathBuf,
}

impl RenderConfig {
    /// 部件渲染输出目录：`<网格目录>/renders/label_<n>`
    pub fn output_dir(item: &WorkItem) -> PathBuf {
        let label = item
            .id()
            .rsplit_once("_label_")
            .map(|(_, n)| n)
            .unwrap_or(item.id());
        let mesh_dir = item.source().parent().unwrap_or_else(|| Path::new("."));
        mesh_dir.join("renders").join(format!("label_{}", label))
    }
}

impl CommandTemplate for RenderConfig {
    fn build(&self, item: &WorkItem) -> CommandLine {
        CommandLine::new(self.blender.display().to_string())
            .arg("-b")
            .arg("-P")
            .path_arg(&self.script)
            .arg("--")
            .arg("--mesh_dir")
            .path_arg(item.source())
            .arg("--output_dir")
            .path_arg(&Self::output_dir(item))
    }

    fn prepare(&self, item: &WorkItem) -> Result<()> {
        let out = Self::output_dir(item);
        fs::create_dir_all(&out).map_err(|e| MeshkitError::FileWriteError {
            path: out.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_config() -> SegmentConfig {
        SegmentConfig {
            python: "python3".to_string(),
            pipeline: PathBuf::from("pipeline.py"),
            config: PathBuf::from("configs/mesh_segmentation.yaml"),
            output: PathBuf::from("out"),
            prefixes: vec!["matte_".to_string(), "segmented_".to_string()],
            resolution: (2048, 2048),
            clear_dir: false,
            visualize: false,
        }
    }

    #[test]
    fn test_segment_args() {
        let item = WorkItem::new("m1", "split/m1");
        let cmd = segment_config().build(&item);
        assert_eq!(cmd.program, "python3");
        assert_eq!(
            cmd.args,
            vec![
                "pipeline.py",
                "--config",
                "configs/mesh_segmentation.yaml",
                "--mesh-id",
                "m1",
                "--assets-dir",
                "split/m1",
                "--output-dir",
                "out",
                "--prefixes",
                "matte_",
                "segmented_",
                "--resolution",
                "2048",
                "2048",
            ]
        );
    }

    #[test]
    fn test_segment_flags_appended_when_set() {
        let mut config = segment_config();
        config.clear_dir = true;
        config.visualize = true;
        config.resolution = (1024, 512);
        let cmd = config.build(&WorkItem::new("m1", "split/m1"));
        assert_eq!(
            &cmd.args[cmd.args.len() - 5..],
            ["--resolution", "1024", "512", "--clear-dir", "--visualize"]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = segment_config();
        let item = WorkItem::new("m1", "split/m1");
        assert_eq!(config.build(&item), config.build(&item));
    }

    #[test]
    fn test_render_args() {
        let config = RenderConfig {
            blender: PathBuf::from("/opt/blender/blender"),
            script: PathBuf::from("render.py"),
        };
        let item = WorkItem::new("m1_label_132", "group/m1/m1_label_132.glb");
        let cmd = config.build(&item);
        assert_eq!(cmd.program, "/opt/blender/blender");
        assert_eq!(
            cmd.args,
            vec![
                "-b",
                "-P",
                "render.py",
                "--",
                "--mesh_dir",
                "group/m1/m1_label_132.glb",
                "--output_dir",
                "group/m1/renders/label_132",
            ]
        );
    }

    #[test]
    fn test_render_prepare_creates_output_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let glb = tmp.path().join("m1").join("m1_label_4.glb");
        let item = WorkItem::new("m1_label_4", &glb);
        let config = RenderConfig {
            blender: PathBuf::from("blender"),
            script: PathBuf::from("render.py"),
        };
        config.prepare(&item).unwrap();
        assert!(tmp.path().join("m1/renders/label_4").is_dir());
    }

    #[test]
    fn test_display() {
        let cmd = CommandLine::new("blender").arg("-b").arg("-P");
        assert_eq!(cmd.to_string(), "blender -b -P");
    }
}

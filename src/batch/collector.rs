//! # 文件收集器
//!
//! 在目录中按 glob 模式收集文件。
//!
//! ## 功能
//! - glob 模式匹配（文件名）
//! - 仅搜索目录的直接子文件
//! - 结果按路径排序
//!
//! ## 依赖关系
//! - 被 `batch/discovery.rs`（渲染部件发现）和 `review/scanner.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{MeshkitError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 搜索目录
    dir: PathBuf,
    /// 文件名匹配模式
    pattern: glob::Pattern,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(dir: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        let pattern = glob::Pattern::new(pattern).map_err(|e| {
            MeshkitError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            dir: dir.into(),
            pattern,
        })
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if !self.dir.is_dir() {
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配
    fn matches(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.pattern.matches(name),
            None => false,
        }
    }
}

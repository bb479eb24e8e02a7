//! # 工作项数据模型
//!
//! 一个工作项对应数据集中一个可独立处理的单元（网格资源目录或分割部件文件）。
//!
//! ## 依赖关系
//! - 被 `batch/discovery.rs` 创建
//! - 被 `batch/invoker.rs`, `batch/runner.rs` 使用

use std::path::{Path, PathBuf};

/// 批处理工作项
///
/// 发现后不可变，由分发循环独占处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// 标识符（通常为目录名）
    id: String,
    /// 源路径
    source: PathBuf,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        WorkItem {
            id: id.into(),
            source: source.into(),
        }
    }

    /// 工作项标识符
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 工作项源路径
    pub fn source(&self) -> &Path {
        &self.source
    }
}

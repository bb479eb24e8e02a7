//! # 工作项发现
//!
//! 将根目录的直接子目录列举为工作项。
//!
//! ## 功能
//! - 网格资源目录发现（分割批处理）
//! - 分割部件 `<mesh_id>_label_<n>.glb` 发现（渲染批处理）
//!
//! ## 依赖关系
//! - 被 `commands/segment.rs`, `commands/render.rs` 调用
//! - 使用 `batch/collector.rs` 按模式收集部件文件

use super::collector::FileCollector;
use crate::error::{MeshkitError, Result};
use crate::models::WorkItem;
use crate::utils::output;

use regex::Regex;
use std::fs;
use std::path::Path;

/// 列举根目录下的所有子目录，按标识符排序
///
/// 根目录不存在或不是目录时返回发现错误。非目录条目和非 UTF-8 名称被忽略。
pub fn discover_work_items(root: &Path) -> Result<Vec<WorkItem>> {
    if !root.exists() {
        return Err(MeshkitError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(MeshkitError::NotADirectory {
            path: root.display().to_string(),
        });
    }

    let entries = fs::read_dir(root).map_err(|e| MeshkitError::FileReadError {
        path: root.display().to_string(),
        source: e,
    })?;

    let mut items = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // 标识符与目录名一一对应
        match entry.file_name().into_string() {
            Ok(id) => items.push(WorkItem::new(id, path)),
            Err(_) => output::print_warning(&format!(
                "Skipping directory with non UTF-8 name: {}",
                path.display()
            )),
        }
    }

    items.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(items)
}

/// 列举每个网格目录下的分割部件文件
///
/// 部件文件名形如 `<mesh_id>_label_<n>.glb`，工作项标识符为去掉扩展名的文件名。
pub fn discover_part_items(mesh_root: &Path) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();

    for mesh in discover_work_items(mesh_root)? {
        let escaped = glob::Pattern::escape(mesh.id());
        let label_re = Regex::new(&format!(r"^{}_label_\d+$", regex::escape(mesh.id())))
            .map_err(|e| MeshkitError::InvalidArgument(e.to_string()))?;

        for part in FileCollector::new(mesh.source(), &format!("{}_label_*.glb", escaped))?.collect()
        {
            let stem = match part.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            if label_re.is_match(&stem) {
                items.push(WorkItem::new(stem, part));
            }
        }
    }

    Ok(items)
}

//! # 质检状态存储
//!
//! 每个分组一个 JSON 文件 `<root>/<group>_status.json`，按需加载、写入即保存。
//!
//! ## 依赖关系
//! - 被 `commands/review.rs` 使用
//! - 使用 `serde_json` 读写状态

use crate::error::{MeshkitError, Result};
use crate::models::{CheckKind, GroupStatus, MeshStatus};
use crate::utils::output;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 单个分组的状态存储
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    /// 分组 `group` 在结果根目录 `root` 下的状态存储
    pub fn for_group(root: &Path, group: &str) -> Self {
        StatusStore {
            path: root.join(format!("{}_status.json", group)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取状态；文件不存在时为空
    pub fn try_load(&self) -> Result<GroupStatus> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GroupStatus::new()),
            Err(e) => {
                return Err(MeshkitError::FileReadError {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| MeshkitError::JsonError {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// 读取状态；无法读取或解析时给出警告并视为空
    pub fn load(&self) -> GroupStatus {
        match self.try_load() {
            Ok(status) => status,
            Err(e) => {
                output::print_warning(&format!("{}; starting from empty status", e));
                GroupStatus::new()
            }
        }
    }

    /// 保存状态
    pub fn save(&self, status: &GroupStatus) -> Result<()> {
        let json = serde_json::to_string_pretty(status).map_err(|e| MeshkitError::JsonError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| MeshkitError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// 更新单个网格的一个质检标记并立即保存
    pub fn update(&self, mesh_id: &str, kind: &CheckKind, checked: bool) -> Result<MeshStatus> {
        let mut status = self.load();
        let entry = status.entry(mesh_id.to_string()).or_default();
        entry.apply(kind, checked);
        let updated = entry.clone();
        self.save(&status)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = StatusStore::for_group(tmp.path(), "000-000");
        assert!(store.try_load().unwrap().is_empty());
        assert_eq!(store.path(), tmp.path().join("000-000_status.json"));
    }

    #[test]
    fn test_update_creates_entry_and_persists() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = StatusStore::for_group(tmp.path(), "g");

        let st = store
            .update("m1", &CheckKind::Caption("gemma".into()), true)
            .unwrap();
        assert!(!st.render);
        assert_eq!(st.captions.get("gemma"), Some(&true));

        store.update("m1", &CheckKind::Render, true).unwrap();
        store.update("m2", &CheckKind::Render, false).unwrap();

        let reloaded = StatusStore::for_group(tmp.path(), "g").try_load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded["m1"].render);
        assert_eq!(reloaded["m1"].captions.get("gemma"), Some(&true));
        assert!(!reloaded["m2"].render);
        assert!(reloaded["m2"].captions.is_empty());
    }

    #[test]
    fn test_unchecking_keeps_suffix_entry() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = StatusStore::for_group(tmp.path(), "g");
        store.update("m1", &CheckKind::Caption("qwen".into()), true).unwrap();
        let st = store.update("m1", &CheckKind::Caption("qwen".into()), false).unwrap();
        assert_eq!(st.captions.get("qwen"), Some(&false));
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = StatusStore::for_group(tmp.path(), "g");
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.try_load(), Err(MeshkitError::JsonError { .. })));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_reads_sidecar_with_missing_fields() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = StatusStore::for_group(tmp.path(), "g");
        fs::write(store.path(), r#"{"m1": {"render": true}}"#).unwrap();
        let status = store.try_load().unwrap();
        assert!(status["m1"].render);
        assert!(status["m1"].captions.is_empty());
    }
}

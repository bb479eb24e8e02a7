//! # 质检状态数据模型
//!
//! 人工审阅时对每个网格记录的渲染/描述质检标记。
//!
//! ## 依赖关系
//! - 被 `review/store.rs` 序列化为 JSON
//! - 被 `commands/review.rs` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个网格的质检状态
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshStatus {
    /// 渲染是否合格
    #[serde(default)]
    pub render: bool,
    /// 各描述后缀的合格标记
    #[serde(default)]
    pub captions: BTreeMap<String, bool>,
}

/// 质检项类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    Render,
    Caption(String),
}

impl MeshStatus {
    /// 应用一次勾选变更
    pub fn apply(&mut self, kind: &CheckKind, checked: bool) {
        match kind {
            CheckKind::Render => self.render = checked,
            CheckKind::Caption(suffix) => {
                self.captions.insert(suffix.clone(), checked);
            }
        }
    }
}

/// 一个分组的全部质检状态（mesh_id -> 状态）
pub type GroupStatus = BTreeMap<String, MeshStatus>;

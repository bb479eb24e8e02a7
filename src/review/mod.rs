//! # 结果审阅模块
//!
//! 扫描分割/渲染结果并维护人工质检状态。
//!
//! ## 依赖关系
//! - 被 `commands/review.rs` 使用
//! - 子模块: scanner, store

pub mod scanner;
pub mod store;

pub use scanner::{list_groups, list_meshes, scan_group, validate_name, CaptionFilter, GroupScan};
pub use store::StatusStore;

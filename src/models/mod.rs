//! # 数据模型模块
//!
//! 定义工作项、执行结果和质检状态的数据模型。
//!
//! ## 依赖关系
//! - 被 `batch/`, `review/` 和 `commands/` 使用
//! - 子模块: work_item, result, status

pub mod result;
pub mod status;
pub mod work_item;

pub use result::{BatchReport, InvocationResult};
pub use status::{CheckKind, GroupStatus, MeshStatus};
pub use work_item::WorkItem;

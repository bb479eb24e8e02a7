//! # 进度显示
//!
//! 批处理进度条（消息区显示失败计数）与审阅扫描 spinner。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/review.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BATCH_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} items ({eta}) {msg}";

const SCAN_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// 批处理进度条，初始显示 0 个失败
pub fn create_batch_bar(items: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(BATCH_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let pb = ProgressBar::new(items).with_style(style);
    set_failed_count(&pb, 0);
    pb
}

/// 更新进度条上的失败计数
pub fn set_failed_count(pb: &ProgressBar, failed: usize) {
    pb.set_message(format!("{} failed", failed));
}

/// 扫描分组时的 spinner
pub fn create_scan_spinner(group: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(SCAN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]);
    let pb = ProgressBar::new_spinner().with_style(style);
    pb.set_message(format!("Scanning {}", group));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(BATCH_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(SCAN_TEMPLATE).is_ok());
    }

    #[test]
    fn test_batch_bar_tracks_failures() {
        let pb = create_batch_bar(5);
        assert_eq!(pb.message(), "0 failed");
        set_failed_count(&pb, 2);
        assert_eq!(pb.message(), "2 failed");
        pb.finish_and_clear();
    }
}

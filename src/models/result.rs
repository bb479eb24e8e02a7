//! # 执行结果数据模型
//!
//! 单个工作项的执行结果，以及整批结果的汇总统计。
//!
//! ## 依赖关系
//! - 被 `batch/invoker.rs` 创建
//! - 被 `batch/runner.rs` 收集
//! - 被 `batch/report.rs` 写入磁盘

/// 单次外部进程执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// 工作项标识符
    pub item_id: String,
    /// 是否成功（退出码为 0）
    pub success: bool,
    /// 捕获的标准输出
    pub stdout: String,
    /// 捕获的标准错误
    pub stderr: String,
    /// 退出码（被信号终止或未能启动时为 None）
    pub exit_code: Option<i32>,
}

impl InvocationResult {
    /// 根据进程退出信息创建结果
    pub fn from_exit(
        item_id: impl Into<String>,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    ) -> Self {
        InvocationResult {
            item_id: item_id.into(),
            success: exit_code == Some(0),
            stdout,
            stderr,
            exit_code,
        }
    }

    /// 进程未能正常执行（无法启动、worker panic 等）
    pub fn aborted(item_id: impl Into<String>, error: impl Into<String>) -> Self {
        InvocationResult {
            item_id: item_id.into(),
            success: false,
            stdout: String::new(),
            stderr: error.into(),
            exit_code: None,
        }
    }

    /// 诊断日志内容：stdout 后接 stderr
    pub fn diagnostic_text(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// 整批执行报告
///
/// 结果按完成顺序排列，而非提交顺序。
#[derive(Debug, Default)]
pub struct BatchReport {
    results: Vec<InvocationResult>,
}

impl BatchReport {
    pub fn new(results: Vec<InvocationResult>) -> Self {
        BatchReport { results }
    }

    pub fn results(&self) -> &[InvocationResult] {
        &self.results
    }

    /// 总数量
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// 成功数量
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// 失败数量
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// 成功率（百分比）；空批次为 0
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.succeeded() as f64 / self.total() as f64 * 100.0
    }

    /// 汇总行
    pub fn summary_line(&self) -> String {
        format!(
            "total: {}  success: {}  fail: {}  success-rate: {:.1}%",
            self.total(),
            self.succeeded(),
            self.failed(),
            self.success_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_follows_exit_code() {
        let ok = InvocationResult::from_exit("a", Some(0), String::new(), String::new());
        let bad = InvocationResult::from_exit("b", Some(1), String::new(), "boom".into());
        let killed = InvocationResult::from_exit("c", None, String::new(), String::new());
        assert!(ok.success);
        assert!(!bad.success);
        assert!(!killed.success);
    }

    #[test]
    fn test_diagnostic_text_concatenates_streams() {
        let r = InvocationResult::from_exit("b", Some(1), "step 1".into(), "boom".into());
        assert_eq!(r.diagnostic_text(), "step 1\nboom");

        let r = InvocationResult::from_exit("b", Some(1), "line\n".into(), "boom".into());
        assert_eq!(r.diagnostic_text(), "line\nboom");

        let r = InvocationResult::aborted("b", "No such file or directory");
        assert_eq!(r.diagnostic_text(), "No such file or directory");
    }

    #[test]
    fn test_summary_line() {
        let report = BatchReport::new(vec![
            InvocationResult::from_exit("a", Some(0), String::new(), String::new()),
            InvocationResult::from_exit("b", Some(1), String::new(), "boom".into()),
            InvocationResult::from_exit("c", Some(0), String::new(), String::new()),
        ]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.summary_line(),
            "total: 3  success: 2  fail: 1  success-rate: 66.7%"
        );
    }

    #[test]
    fn test_empty_report_has_zero_rate() {
        let report = BatchReport::default();
        assert_eq!(report.success_rate(), 0.0);
        assert_eq!(
            report.summary_line(),
            "total: 0  success: 0  fail: 0  success-rate: 0.0%"
        );
    }
}

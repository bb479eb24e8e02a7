//! # 批量分发器
//!
//! 在固定大小的线程池中为每个工作项执行调用，按完成顺序收集结果。
//!
//! ## 功能
//! - 基于 rayon 线程池的有界并发
//! - 结果经 channel 回到分发线程（按完成顺序）
//! - 单项错误或 panic 被转换为失败结果，不影响其他工作项
//! - worker 线程的 panic 不经默认 hook 输出，信息进入该项的失败日志
//! - 进度条显示与逐项状态输出
//!
//! ## 依赖关系
//! - 被 `commands/segment.rs`, `commands/render.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 线程池，`num_cpus` 决定默认并发数

use crate::error::{MeshkitError, Result};
use crate::models::{BatchReport, InvocationResult, WorkItem};
use crate::utils::{output, progress};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Once};
use std::thread;

/// worker 线程名前缀
const WORKER_PREFIX: &str = "meshkit-worker-";

static QUIET_WORKER_PANICS: Once = Once::new();

/// 批量分发器
pub struct BatchDispatcher {
    /// 并发 worker 数
    workers: usize,
}

impl BatchDispatcher {
    /// 创建新的分发器，`workers == 0` 时使用 CPU 核数
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 分发所有工作项，返回时每个工作项恰好对应一个结果
    pub fn dispatch<F>(&self, items: &[WorkItem], invoke: F) -> Result<BatchReport>
    where
        F: Fn(&WorkItem) -> Result<InvocationResult> + Sync,
    {
        silence_worker_panics();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("{}{}", WORKER_PREFIX, i))
            .build()
            .map_err(|e| MeshkitError::Other(format!("Failed to build worker pool: {}", e)))?;

        let pb = progress::create_batch_bar(items.len() as u64);
        let (tx, rx) = mpsc::channel::<InvocationResult>();
        let invoke = &invoke;

        let results = pool.in_place_scope(|scope| {
            for item in items {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = run_isolated(item, invoke);
                    // 接收端在所有发送端释放前不会关闭
                    let _ = tx.send(result);
                });
            }
            drop(tx);

            let mut results = Vec::with_capacity(items.len());
            let mut failed = 0;
            for result in rx {
                pb.suspend(|| print_outcome(&result));
                if !result.success {
                    failed += 1;
                    progress::set_failed_count(&pb, failed);
                }
                pb.inc(1);
                results.push(result);
            }
            results
        });

        pb.finish_and_clear();

        Ok(BatchReport::new(results))
    }
}

/// 执行单个工作项，将错误和 panic 都转换为失败结果
fn run_isolated<F>(item: &WorkItem, invoke: &F) -> InvocationResult
where
    F: Fn(&WorkItem) -> Result<InvocationResult>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| invoke(item))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => InvocationResult::aborted(item.id(), e.to_string()),
        Err(payload) => InvocationResult::aborted(
            item.id(),
            format!("worker panicked: {}", panic_message(&*payload)),
        ),
    }
}

/// 安装进程级 panic hook：worker 线程静默，其他线程仍走原 hook
fn silence_worker_panics() {
    QUIET_WORKER_PANICS.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_worker_thread(thread::current().name()) {
                previous(info);
            }
        }));
    });
}

fn is_worker_thread(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with(WORKER_PREFIX))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// 逐项状态行
fn print_outcome(result: &InvocationResult) {
    if result.success {
        output::print_item_ok(&result.item_id);
    } else {
        let reason = match result.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "did not run to completion".to_string(),
        };
        output::print_item_fail(&result.item_id, &reason);
    }
}

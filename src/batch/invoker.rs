//! # 进程调用器
//!
//! 为单个工作项构造并同步执行外部命令，捕获退出码、stdout 与 stderr。
//!
//! ## 功能
//! - `ProcessRunner` 抽象进程执行，测试中可注入假实现
//! - 非零退出码作为失败结果返回，不上升为错误
//! - 无法启动进程时返回 `SpawnError`，由分发器转换为失败结果
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 的 worker 并发调用
//! - 使用 `batch/command.rs` 构造命令行

use super::command::{CommandLine, CommandTemplate};
use crate::error::{MeshkitError, Result};
use crate::models::{InvocationResult, WorkItem};

use std::io;
use std::process::{Command, Stdio};

/// 进程执行输出
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// 外部进程执行器
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessOutput>;
}

/// 使用 `std::process::Command` 的真实执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> io::Result<ProcessOutput> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// 进程调用器
///
/// 除启动外部进程外不触碰任何共享可变状态，可被多个 worker 并发调用。
pub struct ProcessInvoker<T, R = SystemRunner> {
    template: T,
    runner: R,
}

impl<T: CommandTemplate> ProcessInvoker<T, SystemRunner> {
    pub fn new(template: T) -> Self {
        Self::with_runner(template, SystemRunner)
    }
}

impl<T: CommandTemplate, R: ProcessRunner> ProcessInvoker<T, R> {
    pub fn with_runner(template: T, runner: R) -> Self {
        ProcessInvoker { template, runner }
    }

    /// 执行单个工作项
    pub fn invoke(&self, item: &WorkItem) -> Result<InvocationResult> {
        self.template.prepare(item)?;

        let command = self.template.build(item);
        let output = self
            .runner
            .run(&command)
            .map_err(|e| MeshkitError::SpawnError {
                command: command.to_string(),
                source: e,
            })?;

        Ok(InvocationResult::from_exit(
            item.id(),
            output.exit_code,
            output.stdout,
            output.stderr,
        ))
    }
}

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

pub const DEFAULT_HEAP_SIZE: u64 = 1_000_000;

/// Environment variable carrying the heap size to the build and to the VM.
pub const HEAP_SIZE_ENV: &str = "VM_HEAP_SIZE";

/// Everything one benchmark invocation needs, validated at the CLI boundary.
#[derive(Debug, Clone)]
pub struct InvocationSpec {
    pub heap_size: u64,
    pub iterations: u32,
    pub build_args: Vec<String>,
    pub silent: bool,
    /// Test program base name, e.g. `add` for `test/add.asm`.
    pub target: String,
    /// Values written to the VM's stdin.
    pub inputs: Vec<String>,
}

impl InvocationSpec {
    /// The line fed to the VM's stdin: inputs joined by single spaces, newline-terminated.
    pub fn stdin_line(&self) -> String {
        let mut line = self.inputs.join(" ");
        line.push('\n');
        line
    }
}

/// Builds `<test_dir>/<target>.<extension>`.
pub fn test_file_path(test_dir: &Path, target: &str, extension: &str) -> PathBuf {
    test_dir.join(format!("{target}.{extension}"))
}

/// One measured run of the VM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingSample {
    pub elapsed_secs: f64,
    /// Exit code of the VM, `None` if it was killed by a signal.
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

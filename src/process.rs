use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::errors::VmbenchError;
use crate::types::{HEAP_SIZE_ENV, InvocationSpec, TimingSample};

/// Starts the build step and the VM. The runner only talks to this trait.
pub trait Launcher {
    /// Run the build step. A non-zero exit is `VmbenchError::BuildFailed`.
    fn build(&mut self, spec: &InvocationSpec) -> Result<()>;

    /// Run the VM once on `test_file` and time it. The VM's exit status is
    /// recorded in the sample, never turned into an error.
    fn run_target(&mut self, spec: &InvocationSpec, test_file: &Path) -> Result<TimingSample>;
}

/// Launches real child processes, without a shell in between.
pub struct SystemLauncher {
    config: Config,
}

impl SystemLauncher {
    pub fn new(config: Config) -> Self {
        SystemLauncher { config }
    }
}

impl Launcher for SystemLauncher {
    fn build(&mut self, spec: &InvocationSpec) -> Result<()> {
        tracing::debug!(
            command = %self.config.build_command,
            args = ?spec.build_args,
            "running build step"
        );

        let status = Command::new(&self.config.build_command)
            .args(&spec.build_args)
            .env(HEAP_SIZE_ENV, spec.heap_size.to_string())
            .status()
            .map_err(|source| VmbenchError::BuildSpawnError {
                command: self.config.build_command.clone(),
                source,
            })?;

        if !status.success() {
            tracing::debug!(code = ?status.code(), "build step failed");
            return Err(VmbenchError::BuildFailed {
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    fn run_target(&mut self, spec: &InvocationSpec, test_file: &Path) -> Result<TimingSample> {
        let vm = &self.config.vm;
        let spawn_error = |source| VmbenchError::TargetSpawnError {
            vm: vm.clone(),
            test_file: test_file.to_path_buf(),
            source,
        };

        let stdout = if spec.silent {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        let start = Instant::now();
        let mut child = Command::new(vm)
            .arg(test_file)
            .env(HEAP_SIZE_ENV, spec.heap_size.to_string())
            .stdin(Stdio::piped())
            .stdout(stdout)
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(spec.stdin_line().as_bytes()) {
                Ok(()) => {}
                // The VM is free to exit without reading its input.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(VmbenchError::StdinWriteError {
                        vm: vm.clone(),
                        source,
                    }
                    .into());
                }
            }
        }

        let status = child.wait().map_err(spawn_error)?;
        let elapsed = start.elapsed();

        if !status.success() {
            tracing::info!(
                code = ?status.code(),
                test_file = %test_file.display(),
                "VM exited unsuccessfully"
            );
        }

        Ok(TimingSample {
            elapsed_secs: elapsed.as_secs_f64(),
            exit_code: status.code(),
        })
    }
}

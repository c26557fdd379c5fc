use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum VmbenchError {
    #[error("Build step failed{}", exit_code_suffix(.code))]
    BuildFailed { code: Option<i32> },

    #[error("Failed to run build command '{command}': {source}")]
    BuildSpawnError {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to run VM {vm} on {test_file}: {source}")]
    TargetSpawnError {
        vm: PathBuf,
        test_file: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write stdin of VM {vm}: {source}")]
    StdinWriteError {
        vm: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParseError { path: PathBuf, detail: String },
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => String::new(),
    }
}

impl VmbenchError {
    /// Process exit code for this error. A failed build exits with the build's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            VmbenchError::BuildFailed { code: Some(c) } if *c != 0 => *c,
            _ => 1,
        }
    }
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::VmbenchError;
use crate::types::DEFAULT_HEAP_SIZE;

pub const LOCAL_CONFIG_FILE: &str = "vmbench.toml";

/// On-disk config. Every field is optional and falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub build_command: Option<String>,
    pub vm: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub heap_size: Option<u64>,
}

/// Resolved settings used by the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub build_command: String,
    pub vm: PathBuf,
    pub test_dir: PathBuf,
    pub extension: String,
    pub heap_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            build_command: "make".to_string(),
            vm: PathBuf::from("bin/vm"),
            test_dir: PathBuf::from("test"),
            extension: "asm".to_string(),
            heap_size: DEFAULT_HEAP_SIZE,
        }
    }
}

impl Config {
    fn merge(file: FileConfig) -> Self {
        let defaults = Config::default();
        Config {
            build_command: file.build_command.unwrap_or(defaults.build_command),
            vm: file.vm.unwrap_or(defaults.vm),
            test_dir: file.test_dir.unwrap_or(defaults.test_dir),
            extension: file.extension.unwrap_or(defaults.extension),
            heap_size: file.heap_size.unwrap_or(defaults.heap_size),
        }
    }
}

/// Parse a config file at `path`.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| VmbenchError::ConfigReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig =
        toml::from_str(&content).map_err(|e| VmbenchError::ConfigParseError {
            path: path.to_path_buf(),
            detail: e.message().to_string(),
        })?;
    Ok(Config::merge(file))
}

/// Resolve the config: an explicit path must exist, otherwise try
/// `./vmbench.toml`, then the user config dir, then the defaults.
pub fn load_config(explicit: Option<&Path>, work_dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "using explicit config");
        return read_config_file(path);
    }

    for candidate in candidate_paths(work_dir) {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return read_config_file(&candidate);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn candidate_paths(work_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![work_dir.join(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("vmbench").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_vm_layout() {
        let config = Config::default();
        assert_eq!(config.build_command, "make");
        assert_eq!(config.vm, PathBuf::from("bin/vm"));
        assert_eq!(config.test_dir, PathBuf::from("test"));
        assert_eq!(config.extension, "asm");
        assert_eq!(config.heap_size, 1_000_000);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vmbench.toml");
        fs::write(&path, "vm = \"build/l3vm\"\nheap_size = 4096\n").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.vm, PathBuf::from("build/l3vm"));
        assert_eq!(config.heap_size, 4096);
        assert_eq!(config.build_command, "make");
        assert_eq!(config.extension, "asm");
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vmbench.toml");
        fs::write(&path, "iterations = 3\n").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn malformed_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vmbench.toml");
        fs::write(&path, "heap_size = \"lots\"\n").unwrap();

        assert!(read_config_file(&path).is_err());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");

        let err = load_config(Some(&missing), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn local_file_found_in_work_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(LOCAL_CONFIG_FILE), "build_command = \"ninja\"\n").unwrap();

        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.build_command, "ninja");
    }

    #[test]
    fn explicit_file_wins_over_local() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(LOCAL_CONFIG_FILE), "extension = \"l3\"\n").unwrap();
        let explicit = tmp.path().join("other.toml");
        fs::write(&explicit, "extension = \"s\"\n").unwrap();

        let config = load_config(Some(&explicit), tmp.path()).unwrap();
        assert_eq!(config.extension, "s");
    }
}

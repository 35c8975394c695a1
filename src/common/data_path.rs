// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "EXPLORER_DATA_DIR";

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn anchored(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

/// Data root, first match wins: the configured `data_dir`,
/// `EXPLORER_DATA_DIR`, then `./data`.
pub fn data_root(configured: Option<&str>) -> PathBuf {
    let env = std::env::var(DATA_DIR_ENV).ok();
    let chosen = non_blank(configured)
        .or_else(|| non_blank(env.as_deref()))
        .unwrap_or("data");
    anchored(PathBuf::from(chosen))
}

/// Locate an auxiliary file (e.g. the names table). Absolute paths are
/// used as given, relative ones are tried against the data root and
/// then the working directory. A leading `data/` is tolerated.
pub fn locate_data_file(raw: &str, configured: Option<&str>) -> Result<PathBuf, AppError> {
    let given = Path::new(raw.trim());
    if given.is_absolute() {
        return existing(given.to_path_buf());
    }
    let relative = given.strip_prefix("data").unwrap_or(given);
    let under_root = data_root(configured).join(relative);
    if under_root.exists() {
        return Ok(under_root);
    }
    existing(anchored(given.to_path_buf())).map_err(|_| {
        AppError::Config(format!(
            "{raw} not found under {} or the working directory; set data_dir or {DATA_DIR_ENV}",
            under_root.display()
        ))
    })
}

fn existing(path: PathBuf) -> Result<PathBuf, AppError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(AppError::Config(format!("{} does not exist", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("names.json");
        std::fs::write(&file, "{}").unwrap();
        assert_eq!(locate_data_file(file.to_str().unwrap(), None).unwrap(), file);
    }

    #[test]
    fn configured_root_anchors_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("names.json"), "{}").unwrap();
        let resolved = locate_data_file("data/names.json", dir.path().to_str()).unwrap();
        assert_eq!(resolved, dir.path().join("names.json"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = locate_data_file("absent.json", dir.path().to_str());
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[test]
    fn blank_root_falls_back() {
        assert!(data_root(Some("   ")).is_absolute());
    }
}

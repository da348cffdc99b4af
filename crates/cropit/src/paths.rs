// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::CropitConfig;

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_log_path(file: &str) -> PathBuf {
    let base = env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("cropit").join(file)
}

pub fn default_config_path() -> PathBuf {
    let dir = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"));

    dir.join("cropit").join("cropit.rune")
}

pub fn default_output_dir() -> PathBuf {
    home_dir().join("Pictures").join("Cropit")
}

/// Where exported crops are written.
///
/// Priority:
/// 1) $CROPIT_DIR (if set and non-empty)
/// 2) config cropit.output_directory
pub fn output_dir_from_cfg(cfg: &CropitConfig) -> PathBuf {
    if let Some(v) = env::var_os("CROPIT_DIR") {
        let p = PathBuf::from(v);
        if !p.as_os_str().is_empty() {
            return p;
        }
    }
    cfg.output_directory.clone()
}

pub fn default_output_path(cfg: &CropitConfig, ext: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    output_dir_from_cfg(cfg).join(format!("cropit-{ts}.{ext}"))
}

/// `$env.NAME` → value of NAME. Unset variables are left as written.
pub fn expand_env(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(idx) = rest.find("$env.") {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + "$env.".len()..];
        let end = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..end];

        match env::var(name) {
            Ok(v) if !name.is_empty() => out.push_str(&v),
            _ => out.push_str(&rest[idx..idx + "$env.".len() + end]),
        }
        rest = &after[end..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_env_substitutes_known_vars() {
        // SAFETY: no other test touches this variable.
        unsafe { env::set_var("CROPIT_TEST_EXPAND", "xyz") };
        assert_eq!(expand_env("a:$env.CROPIT_TEST_EXPAND/b"), "a:xyz/b");
    }

    #[test]
    fn expand_env_keeps_unknown_vars() {
        assert_eq!(
            expand_env("$env.CROPIT_SURELY_UNSET_VAR/x"),
            "$env.CROPIT_SURELY_UNSET_VAR/x"
        );
        assert_eq!(expand_env("no vars here"), "no vars here");
    }

    #[test]
    fn log_path_ends_in_cropit_dir() {
        let p = default_log_path("cropit.log");
        assert!(p.ends_with("cropit/cropit.log"));
    }
}
